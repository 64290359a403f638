//! Dialect-aware loader for blueprint documents.
//!
//! Blueprints are YAML with four extra node tags (`!input`, `!include`,
//! `!secret`, `!env_var`). The loader resolves them into opaque
//! [`TaggedValue`] placeholders and never dereferences them: an `!include`
//! does not read a file and a `!secret` does not look anything up.
//!
//! Tag handling is driven by an explicit [`TagRegistry`] passed into
//! [`parse_with`]; [`parse`] uses the built-in table.

mod document;
mod error;
mod loader;
mod node;
mod tags;

pub use document::{BlueprintDocument, LoadError, StructureError};
pub use error::ParseError;
pub use loader::{parse, parse_with};
pub use node::{Node, TaggedValue};
pub use tags::{TagHandler, TagRegistry};
