//! Player commands fed to the engine.
//!
//! Commands are queued and processed at the next update boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Helm ---
    /// Thrust along the ship's heading.
    Forward,
    /// Thrust against the ship's heading.
    Backward,
    /// Spin counter-clockwise.
    TurnLeft,
    /// Spin clockwise.
    TurnRight,
    /// Strafe to the ship's left.
    BankLeft,
    /// Strafe to the ship's right.
    BankRight,
    /// Switch between cruise and boost thrust.
    SetBoost { engaged: bool },

    // --- Weapons ---
    /// Fire the nose gun (subject to reload).
    Fire,
    /// Fire the turret at `index` on the player ship.
    FireTurret { index: usize },

    // --- Simulation control ---
    /// Freeze the world.
    Pause,
    /// Unfreeze the world.
    Resume,
}
