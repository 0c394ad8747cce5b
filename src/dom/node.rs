//! Node types: NodeId, NodeData, ElementData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node: either an element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A text node.
    Text(String),
}

impl NodeData {
    /// Create an element node with the given tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(ElementData::new(tag))
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Borrow the element data, if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Mutably borrow the element data, if this is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// The tag name, or `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }

    /// Look up an attribute value, `None` for text nodes or absent attributes.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|el| el.attr(name))
    }
}

/// An element: tag name plus an ordered attribute list.
///
/// Attributes preserve insertion order so that serialization is deterministic.
/// Attribute names are unique; setting an existing name replaces its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The tag name, e.g. `"div"`, `"template"`.
    pub tag: String,
    attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute is present (regardless of value).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing any existing value under the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    /// The ordered `(name, value)` attribute list.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The whitespace-separated class list from the `class` attribute.
    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the element carries a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| *c == class)
    }

    /// Append a class list to the existing `class` attribute.
    ///
    /// Mirrors class inheritance during mounting: the incoming classes are
    /// trimmed and appended, duplicates are kept as-is.
    pub fn append_classes(&mut self, classes: &str) {
        let incoming = classes.trim();
        if incoming.is_empty() {
            return;
        }
        let merged = match self.attr("class") {
            Some(own) if !own.trim().is_empty() => format!("{} {}", own.trim(), incoming),
            _ => incoming.to_string(),
        };
        self.set_attr("class", merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_new() {
        let el = ElementData::new("div");
        assert_eq!(el.tag, "div");
        assert!(el.attributes().is_empty());
    }

    #[test]
    fn with_attr_builder() {
        let el = ElementData::new("div").with_attr("id", "main").with_attr("class", "box");
        assert_eq!(el.attr("id"), Some("main"));
        assert_eq!(el.attr("class"), Some("box"));
    }

    #[test]
    fn set_attr_replaces() {
        let mut el = ElementData::new("div").with_attr("id", "a");
        el.set_attr("id", "b");
        assert_eq!(el.attr("id"), Some("b"));
        assert_eq!(el.attributes().len(), 1);
    }

    #[test]
    fn set_attr_preserves_order() {
        let mut el = ElementData::new("div");
        el.set_attr("a", "1");
        el.set_attr("b", "2");
        el.set_attr("a", "3");
        let names: Vec<&str> = el.attributes().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn has_attr_empty_value() {
        let el = ElementData::new("div").with_attr("data-s", "");
        assert!(el.has_attr("data-s"));
        assert_eq!(el.attr("data-s"), Some(""));
    }

    #[test]
    fn remove_attr() {
        let mut el = ElementData::new("div").with_attr("id", "x");
        el.remove_attr("id");
        assert!(!el.has_attr("id"));
    }

    #[test]
    fn remove_attr_noop() {
        let mut el = ElementData::new("div");
        el.remove_attr("nonexistent"); // should not panic
        assert!(el.attributes().is_empty());
    }

    #[test]
    fn classes_from_attribute() {
        let el = ElementData::new("div").with_attr("class", "btn  primary");
        assert_eq!(el.classes(), vec!["btn", "primary"]);
        assert!(el.has_class("btn"));
        assert!(!el.has_class("secondary"));
    }

    #[test]
    fn classes_without_attribute() {
        let el = ElementData::new("div");
        assert!(el.classes().is_empty());
    }

    #[test]
    fn append_classes_to_existing() {
        let mut el = ElementData::new("div").with_attr("class", "card");
        el.append_classes(" wide shadow ");
        assert_eq!(el.attr("class"), Some("card wide shadow"));
    }

    #[test]
    fn append_classes_to_empty() {
        let mut el = ElementData::new("div");
        el.append_classes("solo");
        assert_eq!(el.attr("class"), Some("solo"));
    }

    #[test]
    fn append_classes_blank_is_noop() {
        let mut el = ElementData::new("div").with_attr("class", "card");
        el.append_classes("   ");
        assert_eq!(el.attr("class"), Some("card"));
    }

    #[test]
    fn node_data_element_helpers() {
        let node = NodeData::element("span");
        assert!(node.is_element());
        assert_eq!(node.tag(), Some("span"));
        assert!(node.as_element().is_some());
    }

    #[test]
    fn node_data_text_helpers() {
        let node = NodeData::text("hello");
        assert!(!node.is_element());
        assert_eq!(node.tag(), None);
        assert_eq!(node.attr("id"), None);
    }

    #[test]
    fn node_data_attr_shortcut() {
        let node = NodeData::Element(ElementData::new("div").with_attr("data-r", "/"));
        assert_eq!(node.attr("data-r"), Some("/"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
