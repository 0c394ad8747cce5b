//! The component system: definitions, resolution, and the instantiation
//! engine.
//!
//! A [`Definition`] describes a component (markup, styles, guard,
//! lifecycle); a [`Resolver`] supplies definitions by kind and name; the
//! [`Engine`] mounts them into a [`crate::document::Document`], replacing
//! placeholder elements with live, scope-tagged subtrees.
//!
//! Three markup attributes drive composition:
//!
//! - [`ATTR_SLOT`] (`data-s`): a slot point in definition markup, and a
//!   template wrapper in placeholder content. A non-empty value names the
//!   slot; an empty value marks the default slot.
//! - [`ATTR_WIDGET`] (`data-w`): a widget placeholder; the value names the
//!   widget definition to mount there.
//! - [`ATTR_ROUTE`] (`data-r`): a router view placeholder; the value is the
//!   route path the placeholder stands for.

pub mod ctx;
pub mod definition;
pub mod engine;
pub mod resolver;
mod slots;

pub use ctx::{ComponentCtx, InsertMode, Target};
pub use definition::{
    ComponentKind, Definition, DefinitionError, Guard, GuardOutcome, Lifecycle, LifecycleFactory,
};
pub use engine::{Engine, EngineError, MountRequest, Mounted};
pub use resolver::{ResolveError, Resolver, StaticResolver};

/// Slot attribute: slot point (definition side) or template (caller side).
pub const ATTR_SLOT: &str = "data-s";

/// Widget placeholder attribute; its value names the widget.
pub const ATTR_WIDGET: &str = "data-w";

/// Route placeholder attribute; its value is the route path served.
pub const ATTR_ROUTE: &str = "data-r";

/// Placeholder attributes that are never inherited by a mounted root.
pub(crate) const RESERVED_ATTRS: &[&str] = &[ATTR_ROUTE, ATTR_WIDGET];
