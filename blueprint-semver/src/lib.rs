//! Semantic version derivation.
//!
//! A document's version is a pure function of its revision messages. The
//! oldest revision establishes `1.0.0`; every later revision bumps one
//! component according to the keywords in its message.

mod classify;
mod derive;

pub use classify::{BREAKING_KEYWORDS, ChangeKind, FEATURE_KEYWORDS, classify};
pub use derive::{RevisionOrder, VersionStep, derive_version, derive_version_with_trace};
