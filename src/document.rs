//! The document: one DOM arena plus its style registry.

use crate::dom::{parse_fragment, serialize_children, serialize_node, Dom, MarkupError, NodeData, NodeId};
use crate::style::StyleRegistry;

/// One live document: the element tree components are mounted into, and the
/// "head" registry their styles are injected into.
///
/// A fresh document has a single empty `<body>` root; embedders typically
/// fill it with an app shell containing a `[data-r]` placeholder before
/// handing it to the router.
pub struct Document {
    /// The element tree.
    pub dom: Dom,
    /// Injected component styles.
    pub styles: StyleRegistry,
}

impl Document {
    /// Create a document with an empty `<body>` root.
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let body = dom.create(NodeData::element("body"));
        dom.set_root(body);
        Self {
            dom,
            styles: StyleRegistry::new(),
        }
    }

    /// Create a document whose `<body>` contains the given markup.
    pub fn with_body(markup: &str) -> Result<Self, MarkupError> {
        let mut doc = Self::new();
        let body = doc.body();
        let roots = parse_fragment(&mut doc.dom, markup)?;
        for root in roots {
            doc.dom.append_child(body, root);
        }
        Ok(doc)
    }

    /// The `<body>` root node.
    pub fn body(&self) -> NodeId {
        self.dom.root().expect("document always has a body root")
    }

    /// Parse markup into a detached fragment inside this document's arena.
    pub fn parse_fragment(&mut self, markup: &str) -> Result<Vec<NodeId>, MarkupError> {
        parse_fragment(&mut self.dom, markup)
    }

    /// Serialize a node and its subtree.
    pub fn outer_markup(&self, id: NodeId) -> String {
        serialize_node(&self.dom, id)
    }

    /// Serialize a node's children.
    pub fn inner_markup(&self, id: NodeId) -> String {
        serialize_children(&self.dom, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_empty_body() {
        let doc = Document::new();
        let body = doc.body();
        assert_eq!(doc.dom.get(body).unwrap().tag(), Some("body"));
        assert!(doc.dom.children(body).is_empty());
        assert!(doc.styles.is_empty());
    }

    #[test]
    fn with_body_fills_shell() {
        let doc = Document::with_body(r#"<div id="app" data-r=""></div>"#).unwrap();
        let body = doc.body();
        assert_eq!(doc.dom.children(body).len(), 1);
        let app = doc.dom.children(body)[0];
        assert_eq!(doc.dom.get(app).unwrap().attr("id"), Some("app"));
    }

    #[test]
    fn with_body_propagates_parse_errors() {
        assert!(Document::with_body("<div id=").is_err());
    }

    #[test]
    fn markup_helpers() {
        let mut doc = Document::new();
        let roots = doc.parse_fragment("<p><b>X</b></p>").unwrap();
        assert_eq!(doc.outer_markup(roots[0]), "<p><b>X</b></p>");
        assert_eq!(doc.inner_markup(roots[0]), "<b>X</b>");
    }

    #[test]
    fn default_impl() {
        let doc = Document::default();
        assert_eq!(doc.dom.get(doc.body()).unwrap().tag(), Some("body"));
    }
}
