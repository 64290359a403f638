//! Shared DTOs (schemas-as-code) for the blueprints workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod catalog;
pub mod domain;
pub mod report;
pub mod revision;
pub mod version;

pub use catalog::{CatalogCategory, CatalogEntry, CatalogPage, CatalogStats, SkippedDocument};
pub use domain::{Domain, UnknownDomain};
pub use report::{DocumentReport, DuplicateName, ValidationMode, ValidationReport};
pub use revision::RevisionRecord;
pub use version::{VersionParseError, VersionTuple};

/// Schema identifiers.
pub mod schema {
    pub const CATALOG_V1: &str = "blueprints.catalog.v1";
    pub const VALIDATION_REPORT_V1: &str = "blueprints.validation.v1";
}
