//! Entity spawn factories for setting up the sandbox.
//!
//! Creates the player ship, the scattered props and the composite body
//! with appropriate blueprints. All randomness comes from the engine RNG
//! so a seed reproduces the same sandbox.

use std::f64::consts::PI;

use glam::DVec2;
use hecs::Entity;
use log::info;
use rand::Rng;

use starwake_core::components::{Hardpoints, Helm, NoseGun, ProjectileSchema, Turret};
use starwake_core::config::GameConfig;
use starwake_core::enums::EntityKind;
use starwake_core::error::EngineError;
use starwake_core::materials::MaterialId;

use crate::blueprint::EntityBlueprint;
use crate::engine::Engine;

/// Composite body placement, clear of the player at the origin.
pub const COMPOSITE_POSITION: DVec2 = DVec2::new(0.0, -200.0);

/// Set up the sandbox: player ship, props and the composite body.
/// Returns the player entity.
pub fn setup_sandbox(engine: &mut Engine) -> Result<Entity, EngineError> {
    let player = spawn_player(engine)?;
    let props = spawn_props(engine);
    if engine.config().sandbox.composite_body {
        spawn_composite(engine, COMPOSITE_POSITION);
    }
    info!("sandbox ready: player {:?}, {} props", player, props.len());
    Ok(player)
}

/// The player ship blueprint: helm, nose gun and one turret with the
/// configured projectile schema loaded.
pub fn player_blueprint(config: &GameConfig, material: MaterialId) -> Result<EntityBlueprint, EngineError> {
    let p = &config.player;
    let w = &config.weapons;

    let mut turret = Turret::new(DVec2::new(0.0, p.radius), p.turret_radius);
    turret.muzzle_speed = w.turret_muzzle_speed;
    turret.standoff_factor = w.turret_standoff_factor;
    turret.load_projectile(Some(ProjectileSchema {
        radius: w.projectile_radius,
        mass: w.projectile_mass,
        lifetime_secs: w.projectile_lifetime_secs,
        material,
    }))?;

    Ok(
        EntityBlueprint::circle(EntityKind::Ship, DVec2::ZERO, p.radius, p.mass, material)
            .with_helm(Helm::new(p.thrust, p.boost_thrust, p.turn_impulse, p.bank_thrust))
            .with_nose_gun(NoseGun::new(w.reload_secs, w.bullet_speed))
            .with_hardpoints(Hardpoints {
                turrets: vec![turret],
            })
            .with_sprite("ship")
            .as_player(),
    )
}

/// Spawn the player's ship at the origin.
pub fn spawn_player(engine: &mut Engine) -> Result<Entity, EngineError> {
    let material = engine.materials().default_material();
    let blueprint = player_blueprint(engine.config(), material)?;
    Ok(engine.add_entity(blueprint))
}

/// Scatter props whose mass equals their radius.
pub fn spawn_props(engine: &mut Engine) -> Vec<Entity> {
    let sandbox = engine.config().sandbox.clone();
    let material = engine.materials().default_material();

    let rng = engine.rng_mut();
    let count = rng.gen_range(sandbox.prop_count_min..=sandbox.prop_count_max);
    let extent = sandbox.prop_extent.max(0.0);
    let blueprints: Vec<EntityBlueprint> = (0..count)
        .map(|_| {
            let radius = rng.gen_range(sandbox.prop_radius_min..=sandbox.prop_radius_max);
            let position = DVec2::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent));
            EntityBlueprint::circle(EntityKind::Prop, position, radius, radius, material)
        })
        .collect();

    blueprints
        .into_iter()
        .map(|blueprint| engine.add_entity(blueprint))
        .collect()
}

/// The three-circle body: a large hull with two outriggers below it.
/// The outrigger shapes are turned half a revolution; the body is not.
pub fn composite_blueprint(position: DVec2, material: MaterialId) -> EntityBlueprint {
    EntityBlueprint::circle(EntityKind::Prop, position, 40.0, 50.0, material)
        .with_shape(DVec2::new(32.0, -32.0), PI, 20.0, material)
        .with_shape(DVec2::new(-32.0, -32.0), PI, 20.0, material)
}

pub fn spawn_composite(engine: &mut Engine, position: DVec2) -> Entity {
    let material = engine.materials().default_material();
    engine.add_entity(composite_blueprint(position, material))
}
