//! Subtree queries: by attribute presence/value, generic predicate matching.
//!
//! All queries run over the descendants of a scope node (the scope itself is
//! excluded, matching `querySelectorAll` semantics) in document order, and
//! only ever match elements; text nodes are skipped.

use super::node::{ElementData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find all descendant elements matching an arbitrary predicate,
    /// in document order.
    pub fn query_where(
        &self,
        scope: NodeId,
        predicate: impl Fn(&ElementData) -> bool,
    ) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| {
                self.get(id)
                    .and_then(|data| data.as_element())
                    .is_some_and(&predicate)
            })
            .collect()
    }

    /// Find all descendant elements carrying the given attribute.
    pub fn query_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.query_where(scope, |el| el.has_attr(name))
    }

    /// Find all descendant elements whose attribute equals `value` exactly.
    pub fn query_attr_eq(&self, scope: NodeId, name: &str, value: &str) -> Vec<NodeId> {
        self.query_where(scope, |el| el.attr(name) == Some(value))
    }

    /// First descendant element carrying the given attribute, if any.
    pub fn first_attr(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.query_attr(scope, name).into_iter().next()
    }
}
