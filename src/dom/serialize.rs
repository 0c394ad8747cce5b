//! Markup serializer: DOM subtrees back into text.
//!
//! The inverse of [`crate::dom::parse`]: attributes are always emitted
//! double-quoted in insertion order with `"` and `&` entity-escaped, text
//! passes through verbatim, void elements get no close tag.
//! `parse(serialize(tree))` reproduces the tree.

use std::fmt::Write;

use super::node::{NodeData, NodeId};
use super::parse::is_void;
use super::tree::Dom;

/// Serialize a node and its subtree ("outer markup").
pub fn serialize_node(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

/// Serialize a node's children only ("inner markup").
pub fn serialize_children(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(data) = dom.get(id) else {
        return;
    };
    match data {
        NodeData::Text(text) => out.push_str(text),
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in el.attributes() {
                let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
            }
            out.push('>');
            if is_void(&el.tag) {
                return;
            }
            for &child in dom.children(id) {
                write_node(dom, child, out);
            }
            let _ = write!(out, "</{}>", el.tag);
        }
    }
}

/// Entity-escape an attribute value for a double-quoted position. The parser
/// decodes the same two entities, so values containing `"` or `&` survive a
/// serialize-then-parse round trip.
fn escape_attr(value: &str) -> std::borrow::Cow<'_, str> {
    if !value.contains(['"', '&']) {
        return std::borrow::Cow::Borrowed(value);
    }
    std::borrow::Cow::Owned(value.replace('&', "&amp;").replace('"', "&quot;"))
}
