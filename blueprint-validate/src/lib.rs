//! Collection-wide validation.
//!
//! Three independent checks run over every document: syntax (the dialect
//! loader accepts it), schema (the `blueprint` metadata is well formed) and
//! duplicate names. No document's failure stops the others from being
//! checked.

mod duplicates;
mod schema;
mod validator;

pub use duplicates::DuplicateTracker;
pub use schema::{RECOMMENDED_FIELDS, REQUIRED_FIELDS, SchemaCheck, check_schema};
pub use validator::{Validator, validate};
