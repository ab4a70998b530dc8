use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Generational handle to a scene node. Stale handles never alias a
/// node created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub index: u32,
    pub generation: u32,
}

impl NodeId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N{}g{}", self.index, self.generation)
    }
}

/// What a node draws, if anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Groups children; draws nothing itself.
    Container,
    /// Debug outline of a physics circle.
    Circle { radius: f64 },
    /// Textured quad looked up by resource name.
    Sprite { resource: String },
    /// Backdrop star.
    Star { brightness: f64 },
}

impl NodeKind {
    pub fn is_drawable(&self) -> bool {
        !matches!(self, NodeKind::Container)
    }
}

/// A node in the scene graph with a transform relative to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub position: DVec2,
    pub rotation: f64,
    pub scale: f64,
    pub visible: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SceneNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            position: DVec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

pub(crate) struct NodeAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    next_index: u32,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_indices: Vec::new(),
            next_index: 0,
        }
    }

    pub fn allocate(&mut self) -> NodeId {
        if let Some(index) = self.free_indices.pop() {
            let generation = self.generations[index as usize];
            NodeId::new(index, generation)
        } else {
            let index = self.next_index;
            self.next_index += 1;
            self.generations.push(0);
            NodeId::new(index, 0)
        }
    }

    pub fn deallocate(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.generations[id.index as usize] += 1;
            self.free_indices.push(id.index);
        }
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.index as usize) < self.generations.len()
            && self.generations[id.index as usize] == id.generation
    }
}
