//! The handle a lifecycle script works through.
//!
//! [`ComponentCtx`] borrows the engine and document for the duration of
//! `init`, so a script can query its own scoped subtree and patch it with
//! fresh markup, including markup that carries new widget placeholders.

use crate::document::Document;
use crate::dom::{NodeData, NodeId, SelectorList};
use crate::style::ScopeAttr;

use super::engine::{Engine, EngineError};

/// Where an [`ComponentCtx::update`] goes.
#[derive(Debug, Clone, Copy)]
pub enum Target<'s> {
    /// First scoped element matching this selector.
    Selector(&'s str),
    /// An exact node, typically from an earlier `select`.
    Node(NodeId),
}

/// How [`ComponentCtx::update`] inserts the new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// After the target's last child.
    Append,
    /// Before the target's first child.
    Prepend,
    /// As the target's previous sibling.
    Before,
    /// As the target's next sibling.
    After,
    /// In place of the target, which is removed.
    Replace,
}

/// A mounted component's view of the document, scoped to its own subtree.
pub struct ComponentCtx<'a> {
    engine: &'a Engine,
    doc: &'a mut Document,
    root: NodeId,
    scope: ScopeAttr,
}

impl<'a> ComponentCtx<'a> {
    pub(crate) fn new(
        engine: &'a Engine,
        doc: &'a mut Document,
        root: NodeId,
        scope: ScopeAttr,
    ) -> Self {
        Self {
            engine,
            doc,
            root,
            scope,
        }
    }

    /// The component's mounted root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The component's scope attribute.
    pub fn scope(&self) -> &ScopeAttr {
        &self.scope
    }

    /// The document being worked on.
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Mutable access to the document, for work beyond `update`.
    pub fn document_mut(&mut self) -> &mut Document {
        self.doc
    }

    /// Every element under the root that carries this component's scope
    /// attribute and matches the selector, in document order.
    ///
    /// Projected slot content and nested widget subtrees carry other scopes,
    /// so they never match.
    pub fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, EngineError> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .doc
            .dom
            .query_where(self.root, |el| el.has_attr(self.scope.name()) && list.matches(el)))
    }

    /// First scoped element matching the selector, if any.
    pub fn select(&self, selector: &str) -> Result<Option<NodeId>, EngineError> {
        Ok(self.select_all(selector)?.into_iter().next())
    }

    /// Parse `markup`, mount any widget placeholders it carries, and insert
    /// the result relative to `target`.
    ///
    /// The inserted nodes are not scope-tagged; they belong to the document,
    /// not to this component's style scope.
    pub async fn update(
        &mut self,
        markup: &str,
        target: Target<'_>,
        mode: InsertMode,
    ) -> Result<(), EngineError> {
        let target = match target {
            Target::Node(id) => id,
            Target::Selector(selector) => self
                .select(selector)?
                .ok_or_else(|| EngineError::TargetNotFound(selector.to_string()))?,
        };

        // Stage the fragment under a holding element so widget mounting can
        // replace fragment roots in place.
        let parsed = self.doc.parse_fragment(markup)?;
        let staging = self.doc.dom.create(NodeData::element("template"));
        for id in parsed {
            self.doc.dom.append_child(staging, id);
        }
        self.engine.mount_nested_widgets(self.doc, staging).await?;
        let fragment = self.doc.dom.children(staging).to_vec();

        match mode {
            InsertMode::Append => {
                for id in fragment {
                    self.doc.dom.append_child(target, id);
                }
            }
            InsertMode::Prepend => {
                for id in fragment.into_iter().rev() {
                    self.doc.dom.prepend_child(target, id);
                }
            }
            InsertMode::Before => {
                for id in fragment {
                    self.doc.dom.insert_before(target, id);
                }
            }
            InsertMode::After => {
                for id in fragment.into_iter().rev() {
                    self.doc.dom.insert_after(target, id);
                }
            }
            InsertMode::Replace => {
                self.doc.dom.replace_with_fragment(target, &fragment);
            }
        }
        self.doc.dom.remove(staging);
        Ok(())
    }
}
