//! The component instantiation engine.
//!
//! [`Engine::mount`] turns a [`Definition`] into a live subtree: it resolves
//! the definition, evaluates its guard, applies scoped styling, projects
//! slot content from the placeholder, recursively mounts nested widgets,
//! merges inherited attributes, swaps the placeholder for the mounted root,
//! and runs the lifecycle script. The router drives it once per route
//! segment; lifecycle scripts reach it again through
//! [`super::ComponentCtx::update`].

use tracing::warn;

use crate::document::Document;
use crate::dom::{MarkupError, NodeData, NodeId, SelectorError};
use crate::style::{scope_css, StyleKind};
use crate::LocalBoxFuture;

use super::ctx::ComponentCtx;
use super::definition::{ComponentKind, DefinitionError, GuardOutcome};
use super::resolver::{ResolveError, Resolver};
use super::slots;
use super::{ATTR_WIDGET, RESERVED_ATTRS};

/// Errors from mounting a component.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    /// An `update` target selector matched nothing in the component's scope.
    #[error("no scoped element matches selector {0:?}")]
    TargetNotFound(String),
    /// A lifecycle script failed during `init`.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),
}

/// One mount request: which definition, where, and with which forced
/// attributes. Consumed by a single [`Engine::mount`] call.
#[derive(Debug)]
pub struct MountRequest {
    /// Definition name to resolve.
    pub name: String,
    /// View or widget.
    pub kind: ComponentKind,
    /// The node being replaced by the mounted root.
    pub placeholder: NodeId,
    /// Attributes forced onto the mounted root, applied after inheritance.
    pub attrs: Vec<(String, String)>,
}

impl MountRequest {
    /// A view mount request.
    pub fn view(name: impl Into<String>, placeholder: NodeId) -> Self {
        Self {
            name: name.into(),
            kind: ComponentKind::View,
            placeholder,
            attrs: Vec::new(),
        }
    }

    /// A widget mount request.
    pub fn widget(name: impl Into<String>, placeholder: NodeId) -> Self {
        Self {
            name: name.into(),
            kind: ComponentKind::Widget,
            placeholder,
            attrs: Vec::new(),
        }
    }

    /// Force an attribute onto the mounted root (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }
}

/// What a mount produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mounted {
    /// The mounted root node, now in place of the placeholder.
    Node(NodeId),
    /// The definition's guard aborted the mount; navigate here instead.
    /// No tree mutation happened.
    Redirect(String),
}

/// The instantiation engine: a resolver plus the mount algorithm.
///
/// Holds no document state itself; every call mutates the [`Document`]
/// passed in, so one engine can serve any number of documents.
pub struct Engine {
    resolver: Box<dyn Resolver>,
}

impl Engine {
    /// Create an engine over a definition resolver.
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }

    /// Mount a component in place of its placeholder.
    ///
    /// Suspends at definition resolution, guard evaluation, nested widget
    /// mounts, and lifecycle init. Returns the mounted root, or the redirect
    /// path if the definition's guard aborted the mount.
    pub async fn mount(
        &self,
        doc: &mut Document,
        req: MountRequest,
    ) -> Result<Mounted, EngineError> {
        self.mount_boxed(doc, req).await
    }

    /// Boxed indirection so the recursive nested-widget mounts compile.
    fn mount_boxed<'a>(
        &'a self,
        doc: &'a mut Document,
        req: MountRequest,
    ) -> LocalBoxFuture<'a, Result<Mounted, EngineError>> {
        Box::pin(self.mount_inner(doc, req))
    }

    async fn mount_inner(
        &self,
        doc: &mut Document,
        req: MountRequest,
    ) -> Result<Mounted, EngineError> {
        let def = self.resolver.resolve(req.kind, &req.name).await?;

        if def.markup.trim().is_empty() {
            return Err(DefinitionError::MissingMarkup {
                component: req.name,
            }
            .into());
        }
        if def.name.trim().is_empty() {
            return Err(DefinitionError::MissingName {
                component: req.name,
            }
            .into());
        }

        // The guard runs before any tree mutation; a redirect aborts cleanly.
        if let Some(guard) = &def.guard {
            if let GuardOutcome::RedirectTo(path) = guard().await {
                return Ok(Mounted::Redirect(path));
            }
        }

        // Parse the markup; only the first root element is used.
        let parsed = doc.parse_fragment(&def.markup)?;
        let Some(root) = parsed
            .iter()
            .copied()
            .find(|&id| doc.dom.get(id).is_some_and(NodeData::is_element))
        else {
            return Err(DefinitionError::MissingMarkup {
                component: req.name,
            }
            .into());
        };
        let element_roots = parsed
            .iter()
            .filter(|&&id| doc.dom.get(id).is_some_and(NodeData::is_element))
            .count();
        if element_roots > 1 {
            warn!(
                component = %def.name,
                "definition markup has multiple root elements; only the first is used"
            );
        }
        for id in parsed {
            if id != root {
                doc.dom.remove(id);
            }
        }

        // Tag the root marker and the scope attribute on every definition
        // element, before projection: injected slot/widget content is never
        // retroactively scope-tagged.
        let scope = req.kind.scope(&def.name);
        if let Some(el) = doc.dom.get_mut(root).and_then(NodeData::as_element_mut) {
            el.set_attr(scope.root_marker(), "");
        }
        for id in doc.dom.walk_depth_first(root) {
            if let Some(el) = doc.dom.get_mut(id).and_then(NodeData::as_element_mut) {
                el.set_attr(scope.name(), "");
            }
        }

        // Inject styles, once per scope for the document's lifetime.
        if let Some(global) = &def.global_css {
            if !doc.styles.contains(&scope, StyleKind::Global) {
                doc.styles
                    .insert(scope.clone(), StyleKind::Global, global.clone());
            }
        }
        if let Some(css) = &def.css {
            if !doc.styles.contains(&scope, StyleKind::Scoped) {
                let scoped = scope_css(css, &scope);
                doc.styles.insert(scope.clone(), StyleKind::Scoped, scoped);
            }
        }

        // Project caller content into the definition's slot points.
        slots::project_named(doc, root, req.placeholder);
        slots::project_default(doc, root, req.placeholder)?;

        // Mount nested widgets, innermost-last-first.
        self.mount_nested_widgets(doc, root).await?;

        // Inherit the placeholder's attributes, then apply forced ones.
        let inherited: Vec<(String, String)> = doc
            .dom
            .get(req.placeholder)
            .and_then(NodeData::as_element)
            .map(|el| el.attributes().to_vec())
            .unwrap_or_default();
        if let Some(el) = doc.dom.get_mut(root).and_then(NodeData::as_element_mut) {
            for (name, value) in inherited {
                if RESERVED_ATTRS.contains(&name.as_str()) {
                    continue;
                }
                if name == "class" {
                    el.append_classes(&value);
                } else {
                    el.set_attr(name, value);
                }
            }
            for (name, value) in &req.attrs {
                el.set_attr(name.clone(), value.clone());
            }
        }

        // The single atomic tree mutation visible to the outside.
        doc.dom.replace(req.placeholder, root);

        if let Some(factory) = &def.lifecycle {
            let mut lifecycle = factory(root, scope.clone());
            lifecycle
                .init(ComponentCtx::new(self, doc, root, scope))
                .await?;
        }

        Ok(Mounted::Node(root))
    }

    /// Mount every `[data-w]` placeholder under `scope_root`, in reverse
    /// document order, strictly sequentially.
    ///
    /// Reverse order means an inner placeholder is handled before an outer
    /// one can consume it; sequential awaits keep style injection and tree
    /// mutation deterministic. A widget guard redirect is not a navigation:
    /// the mount is skipped and the placeholder stays.
    pub(crate) async fn mount_nested_widgets(
        &self,
        doc: &mut Document,
        scope_root: NodeId,
    ) -> Result<(), EngineError> {
        let placeholders = doc.dom.query_attr(scope_root, ATTR_WIDGET);
        for placeholder in placeholders.into_iter().rev() {
            // A placeholder may have been consumed by a mount that replaced
            // an enclosing placeholder.
            if !doc.dom.contains(placeholder) {
                continue;
            }
            let name = doc
                .dom
                .get(placeholder)
                .and_then(|data| data.attr(ATTR_WIDGET))
                .unwrap_or_default()
                .to_string();
            match self
                .mount_boxed(doc, MountRequest::widget(name.clone(), placeholder))
                .await?
            {
                Mounted::Node(_) => {}
                Mounted::Redirect(path) => {
                    warn!(
                        widget = %name,
                        redirect = %path,
                        "widget guard redirect ignored; placeholder left unmounted"
                    );
                }
            }
        }
        Ok(())
    }
}
