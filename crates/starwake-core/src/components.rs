//! ECS components for hecs entities.
//!
//! Components are plain data. Physics, firing and rendering logic live in
//! the systems of `starwake-sim`; the few methods here only keep derived
//! fields (mass properties) consistent with the data they derive from.

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BodyType, EntityKind};
use crate::error::TurretError;
use crate::materials::MaterialId;

/// A circle attached to a body, expressed in the body's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub offset: DVec2,
    pub angle: f64,
    pub radius: f64,
    pub material: MaterialId,
}

impl CircleShape {
    /// A circle centred on the body origin.
    pub fn centered(radius: f64, material: MaterialId) -> Self {
        Self {
            offset: DVec2::ZERO,
            angle: 0.0,
            radius,
            material,
        }
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

/// A rigid body simulated by the physics world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub body_type: BodyType,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Radians, counter-clockwise.
    pub angle: f64,
    pub angular_velocity: f64,
    /// Force accumulated since the last internal step.
    pub force: DVec2,
    /// Torque accumulated since the last internal step.
    pub torque: f64,
    pub mass: f64,
    pub inv_mass: f64,
    pub inertia: f64,
    pub inv_inertia: f64,
    pub damping: f64,
    pub angular_damping: f64,
    pub shapes: Vec<CircleShape>,
    /// Transform before the most recent internal step.
    pub previous_position: DVec2,
    pub previous_angle: f64,
    /// Transform blended between previous and current by the step remainder.
    pub interpolated_position: DVec2,
    pub interpolated_angle: f64,
}

impl RigidBody {
    pub fn new(body_type: BodyType, mass: f64, position: DVec2, angle: f64) -> Self {
        let mut body = Self {
            body_type,
            position,
            velocity: DVec2::ZERO,
            angle,
            angular_velocity: 0.0,
            force: DVec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
            damping: DEFAULT_DAMPING,
            angular_damping: DEFAULT_ANGULAR_DAMPING,
            shapes: Vec::new(),
            previous_position: position,
            previous_angle: angle,
            interpolated_position: position,
            interpolated_angle: angle,
        };
        body.update_mass_properties();
        body
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_shape(mut self, shape: CircleShape) -> Self {
        self.add_shape(shape);
        self
    }

    /// Attach a shape and recompute mass and inertia.
    pub fn add_shape(&mut self, shape: CircleShape) {
        self.shapes.push(shape);
        self.update_mass_properties();
    }

    /// Recompute inverse mass and moment of inertia from the shapes.
    ///
    /// Mass is spread over the shapes by area; each circle contributes
    /// `m r^2 / 2` about its centre plus `m d^2` for its offset.
    pub fn update_mass_properties(&mut self) {
        if self.body_type != BodyType::Dynamic || self.mass <= 0.0 {
            self.inv_mass = 0.0;
            self.inertia = f64::INFINITY;
            self.inv_inertia = 0.0;
            return;
        }

        self.inv_mass = 1.0 / self.mass;

        let total_area: f64 = self.shapes.iter().map(CircleShape::area).sum();
        let mut inertia = 0.0;
        if total_area > 0.0 {
            for shape in &self.shapes {
                let m = self.mass * shape.area() / total_area;
                inertia += 0.5 * m * shape.radius * shape.radius + m * shape.offset.length_squared();
            }
        }
        self.inertia = inertia;
        self.inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
    }

    /// Radius of a circle around the body origin enclosing every shape.
    pub fn bounding_radius(&self) -> f64 {
        self.shapes
            .iter()
            .map(|s| s.offset.length() + s.radius)
            .fold(0.0, f64::max)
    }

    /// Radius of the first shape, used as "the" radius of simple bodies.
    pub fn primary_radius(&self) -> f64 {
        self.shapes.first().map(|s| s.radius).unwrap_or(0.0)
    }

    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }
}

/// What an entity is, for queries that span kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind(pub EntityKind);

/// Marks the entity controlled by the local player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Removes the entity once `remaining_secs` runs out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}

/// Control tuning and state for a steerable ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helm {
    /// Current forward/backward impulse per update.
    pub thrust: f64,
    pub cruise_thrust: f64,
    pub boost_thrust: f64,
    pub turn_impulse: f64,
    pub bank_thrust: f64,
    pub boosting: bool,
}

impl Helm {
    pub fn new(cruise_thrust: f64, boost_thrust: f64, turn_impulse: f64, bank_thrust: f64) -> Self {
        Self {
            thrust: cruise_thrust,
            cruise_thrust,
            boost_thrust,
            turn_impulse,
            bank_thrust,
            boosting: false,
        }
    }

    pub fn set_boost(&mut self, engaged: bool) {
        self.boosting = engaged;
        self.thrust = if engaged {
            self.boost_thrust
        } else {
            self.cruise_thrust
        };
    }
}

/// Template for projectiles a turret fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSchema {
    pub radius: f64,
    pub mass: f64,
    pub lifetime_secs: f64,
    pub material: MaterialId,
}

impl Default for ProjectileSchema {
    fn default() -> Self {
        Self {
            radius: PROJECTILE_RADIUS,
            mass: PROJECTILE_MASS,
            lifetime_secs: PROJECTILE_LIFETIME_SECS,
            material: MaterialId::default(),
        }
    }
}

/// A hardpoint that spawns projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    /// Mount point in the parent body's local frame.
    pub offset: DVec2,
    /// Aim relative to the parent heading.
    pub angle: f64,
    pub radius: f64,
    pub muzzle_speed: f64,
    pub standoff_factor: f64,
    pub projectile: Option<ProjectileSchema>,
}

impl Turret {
    pub fn new(offset: DVec2, radius: f64) -> Self {
        Self {
            offset,
            angle: 0.0,
            radius,
            muzzle_speed: TURRET_MUZZLE_SPEED,
            standoff_factor: TURRET_STANDOFF_FACTOR,
            projectile: None,
        }
    }

    /// Load the schema used to build fired projectiles.
    pub fn load_projectile(&mut self, schema: Option<ProjectileSchema>) -> Result<(), TurretError> {
        let schema = schema.ok_or(TurretError::NoProjectileSchema)?;
        self.projectile = Some(schema);
        Ok(())
    }
}

/// Turrets mounted on a ship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hardpoints {
    pub turrets: Vec<Turret>,
}

/// The ship's fixed forward gun with its reload window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoseGun {
    pub cooldown_secs: f64,
    /// Physics time of the last shot, `None` before the first.
    pub last_fire_secs: Option<f64>,
    pub muzzle_speed: f64,
}

impl NoseGun {
    pub fn new(cooldown_secs: f64, muzzle_speed: f64) -> Self {
        Self {
            cooldown_secs,
            last_fire_secs: None,
            muzzle_speed,
        }
    }

    /// Whether the gun may fire at physics time `now`.
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_fire_secs {
            Some(last) => now - last + TIMER_EPSILON >= self.cooldown_secs,
            None => true,
        }
    }
}
