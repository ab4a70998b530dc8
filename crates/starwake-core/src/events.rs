//! Events emitted by the simulation for observers (logs, UI, tests).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Something noteworthy that happened during an update.
///
/// Entities are identified by their stable `u64` bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Two bodies started touching.
    Impact { a: u64, b: u64 },
    /// A munition left a gun or turret.
    Fired {
        source: u64,
        kind: EntityKind,
        position: DVec2,
        velocity: DVec2,
    },
    /// An entity joined the world.
    EntityAdded { entity: u64, kind: EntityKind },
    /// An entity left the world.
    EntityRemoved { entity: u64, kind: EntityKind },
}
