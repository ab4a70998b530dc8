//! Frame snapshot: the complete visible state produced by each engine update.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, SimPhase};
use crate::events::SimEvent;
use crate::types::SimTime;

/// Everything an observer needs to draw or inspect one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub entities: Vec<EntityView>,
    pub player: Option<PlayerView>,
    pub camera: CameraView,
    pub debug: DebugView,
    pub events: Vec<SimEvent>,
}

/// One entity as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub entity: u64,
    pub kind: EntityKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub radius: f64,
}

/// Player ship status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity: u64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub boosting: bool,
    pub gun_ready: bool,
    pub turrets: usize,
}

/// Where the world container sits on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// World container offset in screen space.
    pub offset: DVec2,
    /// World point at the centre of the viewport.
    pub focus: DVec2,
}

/// World debug counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugView {
    pub entities: u32,
    pub bodies: u32,
    pub scene_nodes: u32,
    /// Internal physics steps taken this update.
    pub substeps: u32,
    /// Unconsumed time left in the step accumulator.
    pub accumulator: f64,
    /// Touching shape pairs after the last internal step.
    pub contacts: u32,
}
