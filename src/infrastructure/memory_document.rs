//! MemoryDocument - in-memory presentation tree
//!
//! An arena of element nodes implementing [`DocumentPort`]. Layout is not
//! computed: box metrics and stylesheet values are whatever the builder set.
//! Removed nodes stay in the arena but are unreachable from the root.

use std::collections::BTreeMap;

use crate::application::ports::{BoxMetrics, DocumentPort, NodeId, ScrollBehavior};
use crate::domain::value_objects::{ElementTemplate, ElementView, Selector};

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    /// Current value of a form control
    value: Option<String>,
    inline_style: BTreeMap<String, String>,
    /// Values a stylesheet would compute
    sheet_style: BTreeMap<String, String>,
    metrics: BoxMetrics,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A viewport scroll the document was asked to perform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

/// Arena-backed document
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    scrolls: Vec<ScrollRequest>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An `<html>` root holding an empty `<body>`
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            scrolls: Vec::new(),
        };
        doc.root = doc.alloc(Node {
            tag: "html".to_string(),
            ..Default::default()
        });
        let body = doc.alloc(Node {
            tag: "body".to_string(),
            ..Default::default()
        });
        doc.link(doc.root, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Build `template` and append it under `parent`
    pub fn append(&mut self, parent: NodeId, template: &ElementTemplate) -> NodeId {
        let id = self.build(template);
        self.link(parent, id);
        id
    }

    /// Append under `<body>`
    pub fn append_to_body(&mut self, template: &ElementTemplate) -> NodeId {
        self.append(self.body, template)
    }

    pub fn set_metrics(&mut self, node: NodeId, metrics: BoxMetrics) {
        if let Some(n) = self.node_mut(node) {
            n.metrics = metrics;
        }
    }

    /// Give `node` a stylesheet value, visible through `computed_style`
    pub fn set_sheet_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.sheet_style.insert(property.to_string(), value.to_string());
        }
    }

    /// Type into a form control
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.value = Some(value.to_string());
        }
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.value.as_deref())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.text.as_deref())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `node` is reachable from the root
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Scroll requests received so far
    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    /// Parse `selector` and return the first match; `None` on a bad selector
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector).ok()?;
        self.walk().into_iter().find(|n| selector.matches(self, *n))
    }

    /// Parse `selector` and return every match; empty on a bad selector
    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(selector) => self.matching(&selector),
            Err(_) => Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.unlink(child);
        if let Some(n) = self.node_mut(child) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.node_mut(child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != child);
        }
    }

    fn build(&mut self, template: &ElementTemplate) -> NodeId {
        let id = self.alloc(Node {
            tag: template.tag.to_ascii_lowercase(),
            classes: template.classes.clone(),
            attributes: template.attributes.clone(),
            text: template.text.clone(),
            ..Default::default()
        });
        for child in &template.children {
            let child_id = self.build(child);
            self.link(id, child_id);
        }
        id
    }

    fn deep_copy(&mut self, source: NodeId) -> Option<NodeId> {
        let mut copy = self.node(source)?.clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = None;
        let id = self.alloc(copy);
        for child in children {
            if let Some(child_copy) = self.deep_copy(child) {
                self.link(id, child_copy);
            }
        }
        Some(id)
    }

    /// Attached nodes in document order
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    fn matching(&self, selector: &Selector) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}

impl ElementView for MemoryDocument {
    type Node = NodeId;

    fn tag(&self, node: NodeId) -> &str {
        self.node(node).map(|n| n.tag.as_str()).unwrap_or("")
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }
}

impl DocumentPort for MemoryDocument {
    fn body(&mut self) -> Option<NodeId> {
        Some(self.body)
    }

    fn query(&mut self, selector: &Selector) -> Option<NodeId> {
        self.walk().into_iter().find(|n| selector.matches(&*self, *n))
    }

    fn query_all(&mut self, selector: &Selector) -> Vec<NodeId> {
        self.matching(selector)
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        ElementView::parent(self, node)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        ElementView::has_class(self, node, class)
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        let present = n.classes.iter().any(|c| c == class);
        if enabled && !present {
            n.classes.push(class.to_string());
        } else if !enabled && present {
            n.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        ElementView::attribute(self, node, name).map(str::to_string)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        if value.is_empty() {
            n.inline_style.remove(property);
        } else {
            n.inline_style.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node)?.inline_style.get(property).cloned()
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        let n = self.node(node)?;
        n.inline_style
            .get(property)
            .or_else(|| n.sheet_style.get(property))
            .cloned()
    }

    fn metrics(&self, node: NodeId) -> BoxMetrics {
        self.node(node).map(|n| n.metrics).unwrap_or_default()
    }

    fn replace_children(&mut self, parent: NodeId, templates: &[ElementTemplate]) -> Vec<NodeId> {
        for child in self.children(parent).to_vec() {
            self.unlink(child);
        }
        templates.iter().map(|t| self.append(parent, t)).collect()
    }

    fn clone_into(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId> {
        self.node(parent)?;
        let copy = self.deep_copy(node)?;
        self.link(parent, copy);
        Some(copy)
    }

    fn remove(&mut self, node: NodeId) {
        self.unlink(node);
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        self.scrolls.push(ScrollRequest { top, behavior });
    }

    fn reset_form(&mut self, form: NodeId) {
        for id in self.descendants(form) {
            if let Some(n) = self.node_mut(id) {
                n.value = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let nav = doc.append_to_body(
            &ElementTemplate::new("nav").class("nav-menu").children([
                ElementTemplate::new("a").attr("href", "#a").text("A"),
                ElementTemplate::new("a").attr("href", "#b").text("B"),
            ]),
        );
        (doc, nav)
    }

    #[test]
    fn test_query_in_document_order() {
        let (mut doc, nav) = sample();
        let links = doc.query_all(&Selector::parse(".nav-menu a").unwrap());
        assert_eq!(links.len(), 2);
        assert_eq!(doc.text(links[0]), Some("A"));
        assert_eq!(DocumentPort::parent(&mut doc, links[1]), Some(nav));
        assert_eq!(doc.find("body > nav"), Some(nav));
        assert_eq!(doc.find("nav >"), None);
    }

    #[test]
    fn test_classes_and_styles() {
        let (mut doc, nav) = sample();
        assert!(doc.toggle_class(nav, "active"));
        assert!(DocumentPort::has_class(&doc, nav, "active"));
        assert!(!doc.toggle_class(nav, "active"));

        doc.set_sheet_style(nav, "background-image", "none");
        doc.set_style(nav, "background-image", "url(a.jpg)");
        assert_eq!(doc.computed_style(nav, "background-image").as_deref(), Some("url(a.jpg)"));
        doc.set_style(nav, "background-image", "");
        assert_eq!(doc.style(nav, "background-image"), None);
        assert_eq!(doc.computed_style(nav, "background-image").as_deref(), Some("none"));
    }

    #[test]
    fn test_replace_clone_remove() {
        let (mut doc, nav) = sample();
        let old = doc.children(nav).to_vec();

        let new = doc.replace_children(nav, &[ElementTemplate::new("span").class("x")]);
        assert_eq!(doc.children(nav), new.as_slice());
        assert!(!doc.is_attached(old[0]));

        let root = doc.root();
        let copy = DocumentPort::clone_into(&mut doc, nav, root).unwrap();
        assert_eq!(doc.find_all(".x").len(), 2);
        doc.remove(copy);
        assert_eq!(doc.find_all(".x").len(), 1);
    }

    #[test]
    fn test_form_reset_clears_values() {
        let mut doc = MemoryDocument::new();
        let form = doc.append_to_body(
            &ElementTemplate::new("form").child(ElementTemplate::new("input").attr("type", "email")),
        );
        let input = doc.find("form input").unwrap();
        doc.set_value(input, "a@b.c");

        doc.reset_form(form);
        assert_eq!(doc.value(input), None);
    }
}
