//! Engine event bus.
//!
//! A FIFO of events that systems push during an update and the engine
//! drains at a fixed point of the next one. Turrets use it to ask for
//! projectiles without holding the world mutably.

use std::collections::VecDeque;

use crate::blueprint::EntityBlueprint;

/// Requests addressed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Spawn these entities.
    EntityAdd { entities: Vec<EntityBlueprint> },
    /// Remove this entity, its body and its render subtree.
    EntityRemove { entity: hecs::Entity },
}

#[derive(Debug)]
pub struct Dispatcher<E> {
    queue: VecDeque<E>,
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<E> Dispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Take every queued event in dispatch order.
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_dispatch_order() {
        let mut d = Dispatcher::new();
        d.dispatch(1);
        d.dispatch(2);
        d.dispatch(3);
        assert_eq!(d.len(), 3);
        assert_eq!(d.drain(), vec![1, 2, 3]);
        assert!(d.is_empty());
    }
}
