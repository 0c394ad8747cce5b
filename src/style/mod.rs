//! Styling: scope attribute derivation, CSS selector scoping, and the
//! append-only style registry.

pub mod registry;
pub mod scope;

pub use registry::{StyleEntry, StyleKind, StyleRegistry};
pub use scope::{scope_css, ScopeAttr};
