//! ActiveGroup - a set of sibling elements of which at most one is active

use crate::application::ports::{DocumentPort, NodeId};
use crate::widget::ACTIVE_CLASS;

/// Slides, tabs or thumbnails that share one `active` marker
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveGroup {
    nodes: Vec<NodeId>,
}

impl ActiveGroup {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of `node` in the group
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| *n == node)
    }

    /// Mark the element at `index` active and every other one inactive.
    /// An index past the end leaves nothing active.
    pub fn show(&self, document: &mut dyn DocumentPort, index: usize) {
        for (i, node) in self.nodes.iter().enumerate() {
            document.set_class(*node, ACTIVE_CLASS, i == index);
        }
    }

    /// Remove the marker from every element
    pub fn clear(&self, document: &mut dyn DocumentPort) {
        for node in &self.nodes {
            document.set_class(*node, ACTIVE_CLASS, false);
        }
    }

    /// Index of the active element, if exactly one is active
    pub fn active_index(&self, document: &dyn DocumentPort) -> Option<usize> {
        let mut active = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| document.has_class(**n, ACTIVE_CLASS));
        match (active.next(), active.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }
}
