//! NodeRegistry - id allocation for hosts whose elements live outside Rust
//!
//! Ids are handed out in increasing order and never reused, so a stale id
//! can only miss; it never aliases a newer element. Hosts release entries
//! when the elements leave the page, which keeps the registry the size of
//! what the widgets can still reach.

use std::collections::HashMap;

use crate::application::ports::NodeId;

#[derive(Debug)]
pub struct NodeRegistry<E> {
    entries: HashMap<NodeId, E>,
    next_id: u32,
}

impl<E> Default for NodeRegistry<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E> NodeRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` under a fresh id
    pub fn insert(&mut self, element: E) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, element);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&E> {
        self.entries.get(&id)
    }

    pub fn release(&mut self, id: NodeId) -> Option<E> {
        self.entries.remove(&id)
    }

    /// Drop every entry matching `pred`, returning how many went
    pub fn release_if(&mut self, mut pred: impl FnMut(&E) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, element| !pred(element));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A card rebuilt on every render, tagged with the render that made it
    #[derive(Debug, PartialEq)]
    struct Card {
        render: usize,
    }

    #[test]
    fn test_repeated_rebuilds_do_not_grow() {
        let mut registry = NodeRegistry::new();
        let mut last_ids = Vec::new();

        for render in 0..500 {
            // Clearing the grid releases the previous render's cards
            registry.release_if(|card: &Card| card.render + 1 == render);
            last_ids = (0..8).map(|_| registry.insert(Card { render })).collect();
            assert_eq!(registry.len(), 8);
        }

        assert_eq!(registry.get(last_ids[0]), Some(&Card { render: 499 }));
    }

    #[test]
    fn test_released_ids_are_not_reused() {
        let mut registry = NodeRegistry::new();
        let first = registry.insert("clone");
        assert_eq!(registry.release(first), Some("clone"));

        let second = registry.insert("card");
        assert_ne!(first, second);
        assert_eq!(registry.get(first), None);
        assert_eq!(registry.get(second), Some(&"card"));
        assert_eq!(registry.release(first), None);
        assert!(!registry.is_empty());
    }
}
