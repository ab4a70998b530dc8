//! The scene graph arena.
//!
//! Nodes live in a `Vec<Option<SceneNode>>` indexed by `NodeId::index`.
//! A node has at most one parent, and destroying a node destroys its
//! whole subtree.

use glam::DVec2;
use log::warn;

use crate::node::{NodeAllocator, NodeId, NodeKind, SceneNode};

/// A node's transform resolved through all of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: DVec2,
    pub rotation: f64,
    pub scale: f64,
}

impl WorldTransform {
    pub const IDENTITY: WorldTransform = WorldTransform {
        position: DVec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
    };

    /// Map a point from this node's local space into world space.
    pub fn apply(&self, local: DVec2) -> DVec2 {
        self.position + DVec2::from_angle(self.rotation).rotate(local * self.scale)
    }

    /// Compose a child's local transform under this one.
    pub fn then(&self, node: &SceneNode) -> WorldTransform {
        WorldTransform {
            position: self.apply(node.position),
            rotation: self.rotation + node.rotation,
            scale: self.scale * node.scale,
        }
    }
}

pub struct SceneGraph {
    allocator: NodeAllocator,
    nodes: Vec<Option<SceneNode>>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            allocator: NodeAllocator::new(),
            nodes: Vec::new(),
        }
    }

    /// Create a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;
        while self.nodes.len() <= idx {
            self.nodes.push(None);
        }
        self.nodes[idx] = Some(SceneNode::new(kind));
        id
    }

    pub fn create_container(&mut self) -> NodeId {
        self.create(NodeKind::Container)
    }

    pub fn create_circle(&mut self, radius: f64) -> NodeId {
        self.create(NodeKind::Circle { radius })
    }

    pub fn create_sprite(&mut self, resource: &str) -> NodeId {
        self.create(NodeKind::Sprite {
            resource: resource.to_string(),
        })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.allocator.is_alive(id) && self.nodes.get(id.index as usize).is_some_and(Option::is_some)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get(id.index as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get_mut(id.index as usize)?.as_mut()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Returns false (and changes nothing) if either node is dead or the
    /// attachment would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            warn!("add_child with stale node ({parent} <- {child})");
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            warn!("add_child would create a cycle ({parent} <- {child})");
            return false;
        }

        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Detach `child` from `parent` without destroying it.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let is_child = self
            .get(child)
            .is_some_and(|node| node.parent == Some(parent));
        if is_child {
            self.detach(child);
        }
        is_child
    }

    /// Destroy a node and its whole subtree. Returns the number of nodes freed.
    pub fn destroy(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        self.detach(id);

        let doomed = self.iter_depth_first(id);
        for node in &doomed {
            self.nodes[node.index as usize] = None;
            self.allocator.deallocate(*node);
        }
        doomed.len()
    }

    pub fn set_position(&mut self, id: NodeId, position: DVec2) {
        if let Some(node) = self.get_mut(id) {
            node.position = position;
        }
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: f64) {
        if let Some(node) = self.get_mut(id) {
            node.rotation = rotation;
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    /// Resolve a node's transform through all of its ancestors.
    pub fn world_transform(&self, id: NodeId) -> Option<WorldTransform> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current)?;
            chain.push(node);
            cursor = node.parent;
        }

        Some(
            chain
                .iter()
                .rev()
                .fold(WorldTransform::IDENTITY, |acc, node| acc.then(node)),
        )
    }

    /// Pre-order walk of the subtree rooted at `root`.
    pub fn iter_depth_first(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.get(current).and_then(|n| n.parent);
        }
        false
    }
}
