//! Definition resolution: the pluggable loader interface and a static
//! registry implementation.

use std::collections::HashMap;

use crate::LocalBoxFuture;

use super::definition::{ComponentKind, Definition};

/// Errors from definition resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No definition is registered/loadable under this kind + name.
    #[error("no {kind} definition found for {name:?}")]
    NotFound { kind: ComponentKind, name: String },
    /// The definition exists but could not be loaded.
    #[error("failed to load {kind} {name:?}: {message}")]
    Failed {
        kind: ComponentKind,
        name: String,
        message: String,
    },
}

/// Loads component definitions by kind and name.
///
/// The engine resolves a fresh definition per mount request. Resolution is
/// asynchronous so implementations can fetch definitions lazily from
/// wherever they live (network, disk, an embedded table).
pub trait Resolver {
    /// Produce the definition for `name`, or fail distinguishably.
    fn resolve(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> LocalBoxFuture<'_, Result<Definition, ResolveError>>;
}

type DefinitionFactory = Box<dyn Fn() -> Definition>;

/// A resolver backed by in-memory definition factories.
///
/// Factories (rather than stored definitions) because a definition carries
/// single-use boxed closures: every mount request gets a fresh one.
#[derive(Default)]
pub struct StaticResolver {
    views: HashMap<String, DefinitionFactory>,
    widgets: HashMap<String, DefinitionFactory>,
}

impl StaticResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view definition factory under `name`.
    pub fn register_view(&mut self, name: impl Into<String>, factory: impl Fn() -> Definition + 'static) {
        self.views.insert(name.into(), Box::new(factory));
    }

    /// Register a widget definition factory under `name`.
    pub fn register_widget(&mut self, name: impl Into<String>, factory: impl Fn() -> Definition + 'static) {
        self.widgets.insert(name.into(), Box::new(factory));
    }

    /// Number of registered definitions across both kinds.
    pub fn len(&self) -> usize {
        self.views.len() + self.widgets.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.widgets.is_empty()
    }
}

impl Resolver for StaticResolver {
    fn resolve(
        &self,
        kind: ComponentKind,
        name: &str,
    ) -> LocalBoxFuture<'_, Result<Definition, ResolveError>> {
        let table = match kind {
            ComponentKind::View => &self.views,
            ComponentKind::Widget => &self.widgets,
        };
        let result = match table.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(ResolveError::NotFound {
                kind,
                name: name.to_string(),
            }),
        };
        Box::pin(std::future::ready(result))
    }
}
