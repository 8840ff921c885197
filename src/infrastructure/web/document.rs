//! WebDocument - DocumentPort over the browser DOM
//!
//! Elements are interned on first sight. The id is stored on the element
//! itself as an expando property, so finding it again is one property read.
//! Entries are released when their elements are removed or replaced.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlFormElement, ScrollToOptions, Window};

use crate::application::ports::{BoxMetrics, DocumentPort, NodeId, ScrollBehavior};
use crate::domain::value_objects::{ElementTemplate, Selector};
use crate::infrastructure::node_registry::NodeRegistry;

/// Expando property carrying an element's id; not copied by `cloneNode`
const ID_PROPERTY: &str = "__vitrineNode";

pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    nodes: NodeRegistry<Element>,
}

impl WebDocument {
    pub fn new(window: Window, document: web_sys::Document) -> Self {
        Self {
            window,
            document,
            nodes: NodeRegistry::new(),
        }
    }

    /// Id for `element`, registering it if unseen
    pub fn intern(&mut self, element: Element) -> NodeId {
        if let Some(id) = self.tagged(&element) {
            return id;
        }
        let id = self.nodes.insert(element.clone());
        let _ = Reflect::set(&element, &JsValue::from_str(ID_PROPERTY), &JsValue::from(id.0));
        id
    }

    /// Number of elements currently registered
    pub fn registered(&self) -> usize {
        self.nodes.len()
    }

    /// The id stored on `element`, if it is still registered to it
    fn tagged(&self, element: &Element) -> Option<NodeId> {
        let value = Reflect::get(element, &JsValue::from_str(ID_PROPERTY)).ok()?.as_f64()?;
        let id = NodeId(value as u32);
        (self.nodes.get(id)? == element).then_some(id)
    }

    /// Forget `root`'s descendants, and `root` itself when `inclusive`
    fn release_within(&mut self, root: &Element, inclusive: bool) {
        self.nodes
            .release_if(|e| root.contains(Some(&**e)) && (inclusive || e != root));
    }

    pub fn dom(&self) -> &web_sys::Document {
        &self.document
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node)
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node).and_then(|e| e.dyn_ref::<HtmlElement>())
    }

    fn build(&self, template: &ElementTemplate) -> Option<Element> {
        let element = match self.document.create_element(&template.tag) {
            Ok(element) => element,
            Err(e) => {
                log!("WebDocument: cannot create <{}>: {:?}", template.tag, e);
                return None;
            }
        };
        for class in &template.classes {
            let _ = element.class_list().add_1(class);
        }
        for (name, value) in &template.attributes {
            let _ = element.set_attribute(name, value);
        }
        if let Some(text) = &template.text {
            element.set_text_content(Some(text));
        }
        for child in &template.children {
            if let Some(child) = self.build(child) {
                let _ = element.append_child(&child);
            }
        }
        Some(element)
    }
}

impl DocumentPort for WebDocument {
    fn body(&mut self) -> Option<NodeId> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn query(&mut self, selector: &Selector) -> Option<NodeId> {
        let element = self.document.query_selector(selector.as_str()).ok().flatten()?;
        Some(self.intern(element))
    }

    fn query_all(&mut self, selector: &Selector) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(selector.as_str()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.intern(parent))
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|e| e.class_list().contains(class))
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().toggle_with_force(class, enabled);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            log!("WebDocument: style {} = {:?} rejected: {:?}", property, value, e);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self.html(node)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        let element = self.element(node)?;
        let style = self.window.get_computed_style(element).ok().flatten()?;
        let value = style.get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn metrics(&self, node: NodeId) -> BoxMetrics {
        let Some(element) = self.element(node) else {
            return BoxMetrics::default();
        };
        let scroll_height = element.scroll_height() as f32;
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => BoxMetrics {
                offset_top: html.offset_top() as f32,
                offset_height: html.offset_height() as f32,
                scroll_height,
            },
            None => BoxMetrics {
                scroll_height,
                ..Default::default()
            },
        }
    }

    fn replace_children(&mut self, parent: NodeId, templates: &[ElementTemplate]) -> Vec<NodeId> {
        let Some(parent) = self.element(parent).cloned() else {
            return Vec::new();
        };
        self.release_within(&parent, false);
        parent.set_text_content(None);

        let mut built = Vec::with_capacity(templates.len());
        for template in templates {
            if let Some(element) = self.build(template) {
                if parent.append_child(&element).is_ok() {
                    built.push(self.intern(element));
                }
            }
        }
        built
    }

    fn clone_into(&mut self, node: NodeId, parent: NodeId) -> Option<NodeId> {
        let source = self.element(node)?;
        let target = self.element(parent)?;
        let copy = source.clone_node_with_deep(true).ok()?;
        target.append_child(&copy).ok()?;
        let copy = copy.dyn_into::<Element>().ok()?;
        Some(self.intern(copy))
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(element) = self.element(node).cloned() {
            self.release_within(&element, true);
            element.remove();
        }
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(f64::from(top));
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn reset_form(&mut self, form: NodeId) {
        if let Some(form) = self.element(form).and_then(|e| e.dyn_ref::<HtmlFormElement>()) {
            form.reset();
        }
    }
}
