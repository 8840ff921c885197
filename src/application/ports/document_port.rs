//! DocumentPort - interface to the presentation tree
//!
//! Widgets only ever see nodes through this port, so the same code drives the
//! browser DOM and the in-memory document used by tests.

use crate::domain::value_objects::{ElementTemplate, Selector};

/// Opaque handle to an element in the document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Layout numbers read from an element
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BoxMetrics {
    /// Distance from the top of the document
    pub offset_top: f32,
    /// Rendered height
    pub offset_height: f32,
    /// Full content height including overflow
    pub scroll_height: f32,
}

/// How a viewport scroll should move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Port interface for the structured document
pub trait DocumentPort {
    /// The `<body>` element
    fn body(&mut self) -> Option<NodeId>;

    /// First element matching `selector`, in document order
    fn query(&mut self, selector: &Selector) -> Option<NodeId>;

    /// Every element matching `selector`, in document order
    fn query_all(&mut self, selector: &Selector) -> Vec<NodeId>;

    /// Parent element, `None` at the root
    fn parent(&mut self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` carries `class`
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Add or remove `class`
    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool);

    /// Flip `class`, returning whether it is now present
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let enabled = !self.has_class(node, class);
        self.set_class(node, class, enabled);
        enabled
    }

    /// Attribute value
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set an inline style property; an empty value clears it
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Inline style property, if set
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Computed style property (inline style wins over the stylesheet)
    fn computed_style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Layout metrics
    fn metrics(&self, node: NodeId) -> BoxMetrics;

    /// Remove every child of `parent` and build `templates` in their place
    fn replace_children(&mut self, parent: NodeId, templates: &[ElementTemplate]) -> Vec<NodeId>;

    /// Deep-clone `node` and append the copy to `parent`
    fn clone_into(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId>;

    /// Detach `node` from the document
    fn remove(&mut self, node: NodeId);

    /// Scroll the viewport so `top` is at the top edge
    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior);

    /// Reset a form's controls to their initial values
    fn reset_form(&mut self, form: NodeId);
}
