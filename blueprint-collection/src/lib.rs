//! Enumerates a blueprint collection on disk.
//!
//! Documents are found recursively by extension and always returned in
//! lexicographic path order; duplicate detection and category grouping
//! downstream depend on that order being stable across runs.

mod load;

pub use load::{
    DEFAULT_CATEGORY, DEFAULT_EXTENSIONS, DocumentLoadError, LoadedDocument, category_for,
    enumerate_documents, load_documents,
};
