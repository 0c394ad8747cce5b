//! DOM arena: slotmap-backed element tree with markup parsing, serialization,
//! attribute queries, and simple-selector matching.

pub mod node;
pub mod parse;
pub mod query;
pub mod selector;
pub mod serialize;
pub mod tree;

pub use node::{ElementData, NodeData, NodeId};
pub use parse::{parse_fragment, MarkupError};
pub use selector::{SelectorError, SelectorList};
pub use serialize::{serialize_children, serialize_node};
pub use tree::Dom;
