//! Cleanup system: finds munitions that should leave the world.
//!
//! Entities are only collected here. The engine removes them so that
//! their bodies, contact state and scene nodes go together.

use hecs::{Entity, World};

use starwake_core::components::{Kind, Lifetime, RigidBody};

/// Collect expired, out-of-bounds and (optionally) impacting munitions.
///
/// `advanced_secs` is the physics time consumed this update; lifetimes
/// run on physics time so pausing freezes them.
pub fn run(
    world: &mut World,
    advanced_secs: f64,
    world_bound: f64,
    impacts: &[(Entity, Entity)],
    remove_on_impact: bool,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_secs -= advanced_secs;
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    let bound_sq = world_bound * world_bound;
    for (entity, (kind, body)) in world.query_mut::<(&Kind, &RigidBody)>() {
        if kind.0.is_munition() && body.position.length_squared() > bound_sq {
            despawn_buffer.push(entity);
        }
    }

    if remove_on_impact {
        for &(a, b) in impacts {
            for entity in [a, b] {
                let is_munition = world
                    .get::<&Kind>(entity)
                    .is_ok_and(|kind| kind.0.is_munition());
                if is_munition {
                    despawn_buffer.push(entity);
                }
            }
        }
    }

    despawn_buffer.sort_unstable_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
}
