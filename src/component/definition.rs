//! Component definitions: markup, styles, guards, lifecycle factories.

use std::fmt;

use crate::dom::NodeId;
use crate::style::ScopeAttr;
use crate::LocalBoxFuture;

use super::ctx::ComponentCtx;
use super::engine::EngineError;

/// The two component flavors.
///
/// Views are mounted by the router (one per route segment); widgets are
/// nested components mounted inside another component's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    View,
    Widget,
}

impl ComponentKind {
    /// The scope attribute for a definition of this kind.
    pub fn scope(self, name: &str) -> ScopeAttr {
        match self {
            Self::View => ScopeAttr::view(name),
            Self::Widget => ScopeAttr::widget(name),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "view",
            Self::Widget => "widget",
        })
    }
}

/// A resolved definition that cannot be mounted.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The definition has no markup, or its markup has no root element.
    #[error("definition {component:?} has no mountable markup")]
    MissingMarkup { component: String },
    /// The definition has a blank name, so no scope attribute can be derived.
    #[error("definition resolved for {component:?} has no name")]
    MissingName { component: String },
}

/// What a guard decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Mount the component.
    Proceed,
    /// Abort the mount and navigate to this path instead.
    RedirectTo(String),
}

/// A pre-mount check. Runs before any tree mutation; a redirect outcome
/// aborts the mount entirely.
pub type Guard = Box<dyn Fn() -> LocalBoxFuture<'static, GuardOutcome>>;

/// Builds a definition's lifecycle script once its root is mounted.
pub type LifecycleFactory = Box<dyn Fn(NodeId, ScopeAttr) -> Box<dyn Lifecycle>>;

/// A component's lifecycle script.
///
/// Constructed (via [`LifecycleFactory`]) with the mounted root and scope
/// after the component is in the tree; `init` is then invoked and awaited.
/// Errors propagate to whoever requested the mount.
pub trait Lifecycle {
    /// Called once, right after the component is mounted.
    fn init<'a>(&'a mut self, ctx: ComponentCtx<'a>) -> LocalBoxFuture<'a, Result<(), EngineError>> {
        let _ = ctx;
        Box::pin(std::future::ready(Ok(())))
    }
}

/// A declarative component definition.
///
/// Produced by a [`super::Resolver`] per mount request; the engine never
/// caches definitions (a resolver may cache internally).
pub struct Definition {
    /// Unique name within the definition's kind.
    pub name: String,
    /// Serialized markup. Must contain at least one root element; only the
    /// first is used.
    pub markup: String,
    /// Style text scoped to this component's elements.
    pub css: Option<String>,
    /// Style text injected verbatim, unscoped.
    pub global_css: Option<String>,
    /// Optional pre-mount guard.
    pub guard: Option<Guard>,
    /// Optional lifecycle script factory.
    pub lifecycle: Option<LifecycleFactory>,
}

impl Definition {
    /// Create a definition with just a name and markup.
    pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markup: markup.into(),
            css: None,
            global_css: None,
            guard: None,
            lifecycle: None,
        }
    }

    /// Set the scoped CSS (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Set the global CSS (builder).
    pub fn with_global_css(mut self, css: impl Into<String>) -> Self {
        self.global_css = Some(css.into());
        self
    }

    /// Set a synchronous guard (builder).
    pub fn with_guard(mut self, guard: impl Fn() -> GuardOutcome + 'static) -> Self {
        self.guard = Some(Box::new(move || {
            Box::pin(std::future::ready(guard()))
        }));
        self
    }

    /// Set an asynchronous guard (builder).
    pub fn with_async_guard(
        mut self,
        guard: impl Fn() -> LocalBoxFuture<'static, GuardOutcome> + 'static,
    ) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Set the lifecycle script factory (builder).
    pub fn with_lifecycle(
        mut self,
        factory: impl Fn(NodeId, ScopeAttr) -> Box<dyn Lifecycle> + 'static,
    ) -> Self {
        self.lifecycle = Some(Box::new(factory));
        self
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("markup", &self.markup)
            .field("css", &self.css)
            .field("global_css", &self.global_css)
            .field("guard", &self.guard.is_some())
            .field("lifecycle", &self.lifecycle.is_some())
            .finish()
    }
}
