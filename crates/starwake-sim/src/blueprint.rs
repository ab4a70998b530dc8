//! Entity blueprints: everything needed to spawn an entity, as plain data.
//!
//! Blueprints travel through the dispatcher in `EntityAdd` events, so
//! systems that want to create entities never need `&mut World`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use starwake_core::components::{CircleShape, Hardpoints, Helm, NoseGun, RigidBody};
use starwake_core::enums::{BodyType, EntityKind};
use starwake_core::materials::MaterialId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityBlueprint {
    pub kind: EntityKind,
    pub body_type: BodyType,
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub angular_velocity: f64,
    pub mass: f64,
    pub shapes: Vec<CircleShape>,
    /// Overrides the default (linear, angular) damping.
    pub damping: Option<(f64, f64)>,
    pub lifetime_secs: Option<f64>,
    pub helm: Option<Helm>,
    pub hardpoints: Option<Hardpoints>,
    pub nose_gun: Option<NoseGun>,
    pub player: bool,
    /// Sprite resource drawn in the entity's container, besides debug circles.
    pub sprite: Option<String>,
}

impl EntityBlueprint {
    /// A dynamic body with a single circle at its origin.
    pub fn circle(kind: EntityKind, position: DVec2, radius: f64, mass: f64, material: MaterialId) -> Self {
        Self {
            kind,
            body_type: BodyType::Dynamic,
            position,
            velocity: DVec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            mass,
            shapes: vec![CircleShape::centered(radius, material)],
            damping: None,
            lifetime_secs: None,
            helm: None,
            hardpoints: None,
            nose_gun: None,
            player: false,
            sprite: None,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Attach an extra circle in the body's local frame.
    pub fn with_shape(mut self, offset: DVec2, angle: f64, radius: f64, material: MaterialId) -> Self {
        self.shapes.push(CircleShape {
            offset,
            angle,
            radius,
            material,
        });
        self
    }

    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.damping = Some((linear, angular));
        self
    }

    pub fn with_lifetime(mut self, secs: f64) -> Self {
        self.lifetime_secs = Some(secs);
        self
    }

    pub fn with_helm(mut self, helm: Helm) -> Self {
        self.helm = Some(helm);
        self
    }

    pub fn with_hardpoints(mut self, hardpoints: Hardpoints) -> Self {
        self.hardpoints = Some(hardpoints);
        self
    }

    pub fn with_nose_gun(mut self, gun: NoseGun) -> Self {
        self.nose_gun = Some(gun);
        self
    }

    pub fn with_sprite(mut self, resource: &str) -> Self {
        self.sprite = Some(resource.to_string());
        self
    }

    pub fn as_player(mut self) -> Self {
        self.player = true;
        self
    }

    /// Build the rigid body this blueprint describes.
    pub fn build_body(&self) -> RigidBody {
        let mut body = RigidBody::new(self.body_type, self.mass, self.position, self.angle)
            .with_velocity(self.velocity);
        body.angular_velocity = self.angular_velocity;
        if let Some((linear, angular)) = self.damping {
            body.damping = linear;
            body.angular_damping = angular;
        }
        body.shapes = self.shapes.clone();
        body.update_mass_properties();
        body
    }
}
