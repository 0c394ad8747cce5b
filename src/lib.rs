//! # atrium
//!
//! A lightweight component composition and navigation layer: declarative
//! component definitions are instantiated into a live document tree with
//! attribute-scoped CSS and slot-based content projection, and page
//! transitions are driven by a hierarchical, hash-style router that reuses
//! already-mounted ancestor segments.
//!
//! atrium is host-agnostic: the "document" is an in-process DOM arena, not a
//! browser. Embedders supply component definitions through a
//! [`component::Resolver`] and drive navigation by calling
//! [`router::Router::navigate`].
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed DOM arena: tree surgery, markup parsing and
//!   serialization, document-order attribute queries, simple-selector matching
//! - **[`style`]**: Scope attribute derivation, selector-rewriting CSS scoper,
//!   append-only deduplicated style registry
//! - **[`component`]**: Definitions, guards, lifecycle scripts, the resolver
//!   interface, and the instantiation engine
//! - **[`router`]**: Progressive path chains, mounted-frame reuse, guard
//!   redirection, navigation events
//! - **[`document`]**: The [`document::Document`] owning one DOM plus its
//!   style registry

use std::future::Future;
use std::pin::Pin;

// Core systems
pub mod dom;
pub mod style;

// Components and routing
pub mod component;
pub mod router;

// Document
pub mod document;

/// A boxed future without a `Send` bound.
///
/// The whole engine runs single-threaded (mounts, guards, and lifecycle init
/// all mutate one document in sequence), so futures never cross threads.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
