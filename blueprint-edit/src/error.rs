//! Error types for blueprint-edit.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// None of the `name:` forms matched the loaded name.
    #[error("no `name:` line matching \"{name}\" found")]
    NameNotFound { name: String },
}

pub type EditResult<T> = Result<T, EditError>;
