//! Weapons: turret and nose gun firing kinematics.
//!
//! Firing never touches the world directly. A fire solution is derived
//! from the parent body's transform and momentum, turned into a
//! blueprint, and dispatched as an `EntityAdd` event for the engine to
//! spawn at its next drain.

use glam::DVec2;
use hecs::{ComponentError, Entity, World};
use log::debug;

use starwake_core::components::{Hardpoints, NoseGun, ProjectileSchema, RigidBody, Turret};
use starwake_core::config::WeaponConfig;
use starwake_core::constants::{FACING_OFFSET, NOSE_GUN_PAD, TURRET_STANDOFF_PAD};
use starwake_core::enums::EntityKind;
use starwake_core::error::{EngineError, TurretError};
use starwake_core::events::SimEvent;
use starwake_core::materials::MaterialId;
use starwake_core::types::{direction, to_global_frame};

use crate::blueprint::EntityBlueprint;
use crate::dispatcher::{Dispatcher, EngineEvent};

/// Where and how fast a munition leaves its gun, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireSolution {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Body angle given to the spawned munition. Like every ship and
    /// munition it faces local +y, so it travels along
    /// `direction(heading + FACING_OFFSET)`.
    pub heading: f64,
}

/// Fire solution for a turret mounted on `parent`.
///
/// The mount point is the turret offset carried into world space by the
/// parent transform. The muzzle sits `(radius + 3) * standoff_factor`
/// beyond it along the firing direction, and the munition inherits the
/// parent's velocity on top of the muzzle speed.
pub fn turret_fire_solution(turret: &Turret, parent: &RigidBody) -> FireSolution {
    let reach = (turret.radius + TURRET_STANDOFF_PAD) * turret.standoff_factor;
    let heading = parent.angle + turret.angle;
    let dir = direction(heading + FACING_OFFSET);

    let mount = to_global_frame(turret.offset, parent.position, parent.angle);

    FireSolution {
        position: mount + dir * reach,
        velocity: dir * turret.muzzle_speed + parent.velocity,
        heading,
    }
}

/// Fire solution for the fixed forward gun of a ship.
pub fn nose_gun_fire_solution(
    ship: &RigidBody,
    bullet_radius: f64,
    muzzle_speed: f64,
) -> FireSolution {
    let reach = ship.primary_radius() + bullet_radius + NOSE_GUN_PAD;
    let dir = direction(ship.angle + FACING_OFFSET);

    FireSolution {
        position: ship.position + dir * reach,
        velocity: dir * muzzle_speed + ship.velocity,
        heading: ship.angle,
    }
}

/// Projectile schema for a turret: its loaded schema or the configured default.
pub fn effective_schema(turret: &Turret, weapons: &WeaponConfig, material: MaterialId) -> ProjectileSchema {
    turret.projectile.unwrap_or(ProjectileSchema {
        radius: weapons.projectile_radius,
        mass: weapons.projectile_mass,
        lifetime_secs: weapons.projectile_lifetime_secs,
        material,
    })
}

pub fn projectile_blueprint(solution: &FireSolution, schema: &ProjectileSchema) -> EntityBlueprint {
    EntityBlueprint::circle(
        EntityKind::Projectile,
        solution.position,
        schema.radius,
        schema.mass,
        schema.material,
    )
    .with_velocity(solution.velocity)
    .with_angle(solution.heading)
    .with_damping(0.0, 0.0)
    .with_lifetime(schema.lifetime_secs)
}

pub fn bullet_blueprint(solution: &FireSolution, weapons: &WeaponConfig, material: MaterialId) -> EntityBlueprint {
    EntityBlueprint::circle(
        EntityKind::Bullet,
        solution.position,
        weapons.bullet_radius,
        weapons.bullet_mass,
        material,
    )
    .with_velocity(solution.velocity)
    .with_angle(solution.heading)
    .with_damping(0.0, 0.0)
    .with_lifetime(weapons.bullet_lifetime_secs)
}

/// Fire turret `index` of `ship`, dispatching the projectile for spawning.
pub fn fire_turret(
    world: &World,
    ship: Entity,
    index: usize,
    weapons: &WeaponConfig,
    material: MaterialId,
    dispatcher: &mut Dispatcher<EngineEvent>,
    events: &mut Vec<SimEvent>,
) -> Result<FireSolution, EngineError> {
    let id = ship.to_bits().get();
    let body = world.get::<&RigidBody>(ship).map_err(|err| match err {
        ComponentError::NoSuchEntity => EngineError::UnknownEntity(id),
        ComponentError::MissingComponent(_) => EngineError::NoBody(id),
    })?;
    let hardpoints = world
        .get::<&Hardpoints>(ship)
        .map_err(|_| TurretError::NoSuchTurret(index))?;
    let turret = hardpoints
        .turrets
        .get(index)
        .ok_or(TurretError::NoSuchTurret(index))?;

    let solution = turret_fire_solution(turret, &body);
    let schema = effective_schema(turret, weapons, material);

    debug!(
        "turret {index} fired from {:?} at {:?} v={:?}",
        ship, solution.position, solution.velocity
    );
    dispatcher.dispatch(EngineEvent::EntityAdd {
        entities: vec![projectile_blueprint(&solution, &schema)],
    });
    events.push(SimEvent::Fired {
        source: id,
        kind: EntityKind::Projectile,
        position: solution.position,
        velocity: solution.velocity,
    });
    Ok(solution)
}

/// Fire the nose gun of `ship` if its reload window has passed at physics time `now`.
///
/// Returns the fire solution when a bullet was dispatched.
pub fn fire_nose_gun(
    world: &mut World,
    ship: Entity,
    now: f64,
    weapons: &WeaponConfig,
    material: MaterialId,
    dispatcher: &mut Dispatcher<EngineEvent>,
    events: &mut Vec<SimEvent>,
) -> Option<FireSolution> {
    let (gun, body) = world
        .query_one_mut::<(&mut NoseGun, &RigidBody)>(ship)
        .ok()?;

    if !gun.is_ready(now) {
        return None;
    }
    gun.last_fire_secs = Some(now);

    let solution = nose_gun_fire_solution(body, weapons.bullet_radius, gun.muzzle_speed);
    debug!("nose gun fired from {:?} at t={now:.3}", ship);

    dispatcher.dispatch(EngineEvent::EntityAdd {
        entities: vec![bullet_blueprint(&solution, weapons, material)],
    });
    events.push(SimEvent::Fired {
        source: ship.to_bits().get(),
        kind: EntityKind::Bullet,
        position: solution.position,
        velocity: solution.velocity,
    });
    Some(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use starwake_core::components::CircleShape;
    use starwake_core::enums::BodyType;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn parent(position: DVec2, angle: f64, velocity: DVec2) -> RigidBody {
        RigidBody::new(BodyType::Dynamic, 10.0, position, angle)
            .with_velocity(velocity)
            .with_shape(CircleShape::centered(20.0, MaterialId(0)))
    }

    #[test]
    fn turret_at_rest_fires_along_local_y() {
        let turret = Turret::new(DVec2::ZERO, 4.0);
        let ship = parent(DVec2::ZERO, 0.0, DVec2::ZERO);
        let s = turret_fire_solution(&turret, &ship);

        // r = (4 + 3) * 1.5 = 10.5, straight up.
        assert_relative_eq!(s.position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.position.y, 10.5, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn turret_mount_is_carried_by_parent_rotation() {
        let turret = Turret::new(DVec2::new(0.0, 20.0), 4.0);
        let ship = parent(DVec2::new(100.0, 50.0), FRAC_PI_2, DVec2::ZERO);
        let s = turret_fire_solution(&turret, &ship);

        // Parent faces -x; mount is 20 units ahead, muzzle 10.5 further.
        assert_relative_eq!(s.position.x, 100.0 - 30.5, epsilon = 1e-9);
        assert_relative_eq!(s.position.y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.x, -50.0, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.heading, FRAC_PI_2);
        let travel = direction(s.heading + FACING_OFFSET);
        assert_relative_eq!(travel.x, s.velocity.normalize().x, epsilon = 1e-9);
    }

    #[test]
    fn turret_velocity_inherits_parent_momentum() {
        let turret = Turret::new(DVec2::ZERO, 4.0);
        let ship = parent(DVec2::ZERO, PI, DVec2::new(7.0, -3.0));
        let s = turret_fire_solution(&turret, &ship);

        assert_relative_eq!(s.velocity.x, 7.0, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.y, -50.0 - 3.0, epsilon = 1e-9);
    }

    #[test]
    fn turret_aim_adds_to_parent_heading() {
        let mut turret = Turret::new(DVec2::ZERO, 4.0);
        turret.angle = -FRAC_PI_2;
        let ship = parent(DVec2::ZERO, 0.0, DVec2::ZERO);
        let s = turret_fire_solution(&turret, &ship);

        // Aimed a quarter turn clockwise from forward: +x.
        assert_relative_eq!(s.position.x, 10.5, epsilon = 1e-9);
        assert_relative_eq!(s.position.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn nose_gun_clears_the_hull() {
        let ship = parent(DVec2::new(5.0, 5.0), 0.0, DVec2::new(1.0, 2.0));
        let s = nose_gun_fire_solution(&ship, 3.0, 85.0);

        // (20 + 3) + 1.2 ahead of the centre.
        assert_relative_eq!(s.position.y, 5.0 + 24.2, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(s.velocity.y, 87.0, epsilon = 1e-9);
    }

    #[test]
    fn loaded_schema_wins_over_config_default() {
        let weapons = WeaponConfig::default();
        let mut turret = Turret::new(DVec2::ZERO, 4.0);
        assert_eq!(effective_schema(&turret, &weapons, MaterialId(0)).radius, weapons.projectile_radius);

        let heavy = ProjectileSchema {
            radius: 8.0,
            mass: 4.0,
            lifetime_secs: 1.0,
            material: MaterialId(0),
        };
        turret.load_projectile(Some(heavy)).unwrap();
        assert_eq!(effective_schema(&turret, &weapons, MaterialId(0)), heavy);
    }

    #[test]
    fn fire_turret_dispatches_entity_add() {
        let mut world = World::new();
        let body = parent(DVec2::ZERO, 0.0, DVec2::ZERO);
        let ship = world.spawn((
            body,
            Hardpoints {
                turrets: vec![Turret::new(DVec2::ZERO, 4.0)],
            },
        ));
        let mut dispatcher = Dispatcher::new();
        let mut events = Vec::new();

        fire_turret(&world, ship, 0, &WeaponConfig::default(), MaterialId(0), &mut dispatcher, &mut events)
            .unwrap();

        let drained = dispatcher.drain();
        assert_eq!(drained.len(), 1);
        match &drained[0] {
            EngineEvent::EntityAdd { entities } => {
                assert_eq!(entities.len(), 1);
                assert_eq!(entities[0].kind, EntityKind::Projectile);
                assert!(entities[0].lifetime_secs.is_some());
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(events[0], SimEvent::Fired { kind: EntityKind::Projectile, .. }));
    }

    #[test]
    fn fire_turret_rejects_missing_turret() {
        let mut world = World::new();
        let ship = world.spawn((parent(DVec2::ZERO, 0.0, DVec2::ZERO), Hardpoints::default()));
        let mut dispatcher = Dispatcher::new();
        let err = fire_turret(&world, ship, 3, &WeaponConfig::default(), MaterialId(0), &mut dispatcher, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err, EngineError::Turret(TurretError::NoSuchTurret(3)));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn nose_gun_respects_reload() {
        let mut world = World::new();
        let ship = world.spawn((parent(DVec2::ZERO, 0.0, DVec2::ZERO), NoseGun::new(0.1, 85.0)));
        let weapons = WeaponConfig::default();
        let mut dispatcher = Dispatcher::new();
        let mut events = Vec::new();

        assert!(fire_nose_gun(&mut world, ship, 0.0, &weapons, MaterialId(0), &mut dispatcher, &mut events).is_some());
        assert!(fire_nose_gun(&mut world, ship, 0.05, &weapons, MaterialId(0), &mut dispatcher, &mut events).is_none());
        assert!(fire_nose_gun(&mut world, ship, 0.15, &weapons, MaterialId(0), &mut dispatcher, &mut events).is_some());
        assert_eq!(dispatcher.len(), 2);
    }
}
