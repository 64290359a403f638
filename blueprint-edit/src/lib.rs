//! Text edits applied to blueprint documents.
//!
//! Edits are textual so comments, key order and quoting survive; the YAML
//! is never re-serialized.

pub mod error;
mod name;
mod patch;

pub use error::{EditError, EditResult};
pub use name::{NameStyle, rewrite_name, versioned_name};
pub use patch::{FileChange, render_patch};
