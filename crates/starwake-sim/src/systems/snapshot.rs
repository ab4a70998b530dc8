//! Snapshot system: queries the ECS world and builds a `FrameSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use starwake_core::components::{Hardpoints, Helm, Kind, NoseGun, Player, RigidBody};
use starwake_core::enums::SimPhase;
use starwake_core::events::SimEvent;
use starwake_core::state::{CameraView, DebugView, EntityView, FrameSnapshot, PlayerView};
use starwake_core::types::SimTime;

/// Build a complete `FrameSnapshot` from the current world state.
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    phase: SimPhase,
    physics_time: f64,
    camera: CameraView,
    debug: DebugView,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time,
        phase,
        entities: build_entities(world),
        player: build_player(world, physics_time),
        camera,
        debug,
        events,
    }
}

/// Every body with a kind, ordered by entity id.
fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<(&Kind, &RigidBody)>()
        .iter()
        .map(|(entity, (kind, body))| EntityView {
            entity: entity.to_bits().get(),
            kind: kind.0,
            position: body.interpolated_position,
            velocity: body.velocity,
            angle: body.interpolated_angle,
            radius: body.bounding_radius(),
        })
        .collect();
    views.sort_by_key(|v| v.entity);
    views
}

fn build_player(world: &World, physics_time: f64) -> Option<PlayerView> {
    let mut query = world.query::<(&Player, &RigidBody, Option<&Helm>, Option<&NoseGun>, Option<&Hardpoints>)>();
    let (entity, (_, body, helm, gun, hardpoints)) = query.iter().next()?;

    Some(PlayerView {
        entity: entity.to_bits().get(),
        position: body.interpolated_position,
        velocity: body.velocity,
        angle: body.interpolated_angle,
        boosting: helm.is_some_and(|h| h.boosting),
        gun_ready: gun.is_some_and(|g| g.is_ready(physics_time)),
        turrets: hardpoints.map_or(0, |h| h.turrets.len()),
    })
}
