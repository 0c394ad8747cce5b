//! The style registry: the document's "head".
//!
//! An append-only, deduplicated set of injected style blocks keyed by
//! (scope, kind). Injecting the same key twice is a no-op, so two mounts of
//! the same component never duplicate its CSS. Entries are never removed or
//! rewritten; redefining a component under the same name with different CSS
//! is unsupported.

use super::scope::ScopeAttr;

/// Which flavor of style block an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Unscoped CSS injected verbatim.
    Global,
    /// CSS whose selectors were rewritten with the scope qualifier.
    Scoped,
}

/// One injected style block.
#[derive(Debug, Clone)]
pub struct StyleEntry {
    /// The owning component's scope attribute.
    pub scope: ScopeAttr,
    /// Global or scoped.
    pub kind: StyleKind,
    /// The style text as injected.
    pub css: String,
}

/// Append-only registry of injected style blocks.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    entries: Vec<StyleEntry>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists for this (scope, kind).
    pub fn contains(&self, scope: &ScopeAttr, kind: StyleKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.scope == *scope && e.kind == kind)
    }

    /// Insert a style block unless one already exists for (scope, kind).
    ///
    /// Returns `true` if the block was inserted, `false` on the duplicate
    /// no-op.
    pub fn insert(&mut self, scope: ScopeAttr, kind: StyleKind, css: impl Into<String>) -> bool {
        if self.contains(&scope, kind) {
            return false;
        }
        self.entries.push(StyleEntry {
            scope,
            kind,
            css: css.into(),
        });
        true
    }

    /// All injected entries in injection order.
    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    /// Number of injected entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been injected yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All injected CSS concatenated in injection order, for rendering the
    /// registry into an actual `<head>` by an embedder.
    pub fn combined_css(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
