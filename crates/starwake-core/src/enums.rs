//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Whether the engine is advancing the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// How a rigid body participates in the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Moved by forces, impulses and contacts.
    #[default]
    Dynamic,
    /// Never moves; infinite mass.
    Static,
    /// Moves with its velocity but ignores forces and contacts.
    Kinematic,
}

/// What an entity represents in the sandbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A player or AI ship.
    Ship,
    /// Inert debris floating in the sandbox.
    #[default]
    Prop,
    /// Fired by a ship's nose gun.
    Bullet,
    /// Fired by a turret hardpoint.
    Projectile,
}

impl EntityKind {
    /// Short-lived munitions that are cleaned up by lifetime and bounds.
    pub fn is_munition(self) -> bool {
        matches!(self, EntityKind::Bullet | EntityKind::Projectile)
    }
}
