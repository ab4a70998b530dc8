//! Renderer seam and the headless frame recorder.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::graph::{SceneGraph, WorldTransform};
use crate::node::{NodeId, NodeKind};

/// Draws a scene graph starting at `root`.
pub trait Renderer {
    fn render(&mut self, scene: &SceneGraph, root: NodeId);
}

/// One drawable leaf resolved to screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub node: NodeId,
    pub kind: NodeKind,
    pub position: DVec2,
    pub rotation: f64,
    pub scale: f64,
}

/// Renderer that records draw calls instead of rasterising them.
///
/// Invisible nodes hide their whole subtree.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    calls: Vec<DrawCall>,
    frames: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the most recent frame.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn visit(&mut self, scene: &SceneGraph, id: NodeId, parent: WorldTransform) {
        let Some(node) = scene.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let transform = parent.then(node);
        if node.kind.is_drawable() {
            self.calls.push(DrawCall {
                node: id,
                kind: node.kind.clone(),
                position: transform.position,
                rotation: transform.rotation,
                scale: transform.scale,
            });
        }
        for child in &node.children {
            self.visit(scene, *child, transform);
        }
    }
}

impl Renderer for FrameRecorder {
    fn render(&mut self, scene: &SceneGraph, root: NodeId) {
        self.calls.clear();
        self.frames += 1;
        // Start from the root's own parent chain so partial renders stay in screen space.
        let base = scene
            .get(root)
            .and_then(|n| n.parent)
            .and_then(|p| scene.world_transform(p))
            .unwrap_or(WorldTransform::IDENTITY);
        self.visit(scene, root, base);
    }
}
