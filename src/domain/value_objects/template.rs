//! ElementTemplate - a node subtree the renderers hand to the document

/// Description of an element and its children
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTemplate {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementTemplate>,
}

impl ElementTemplate {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute; `id` is an attribute like any other
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ElementTemplate) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementTemplate>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for the first descendant (or self) with a class
    pub fn find_class(&self, class: &str) -> Option<&ElementTemplate> {
        if self.classes.iter().any(|c| c == class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_class(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let card = ElementTemplate::new("div")
            .class("product-item")
            .child(
                ElementTemplate::new("img")
                    .class("product-image")
                    .attr("src", "./images/p1.jpg"),
            )
            .child(ElementTemplate::new("p").class("product-name").text("Blend"));

        let image = card.find_class("product-image").unwrap();
        assert_eq!(image.attribute("src"), Some("./images/p1.jpg"));
        assert_eq!(card.find_class("product-name").unwrap().text.as_deref(), Some("Blend"));
        assert!(card.find_class("missing").is_none());
    }
}
