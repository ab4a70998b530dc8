//! Render scene graph for STARWAKE.
//!
//! A tree of containers and drawable leaves, addressed by generational
//! `NodeId`s. The simulation mirrors rigid bodies into containers each
//! frame; a `Renderer` walks the tree from a root and draws it.

pub mod graph;
pub mod node;
pub mod render;

pub use graph::{SceneGraph, WorldTransform};
pub use node::{NodeId, NodeKind, SceneNode};
pub use render::{DrawCall, FrameRecorder, Renderer};
