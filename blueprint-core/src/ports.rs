//! Port traits abstracting all I/O away from the pipelines.

use blueprint_collection::LoadedDocument;
use blueprint_semver::RevisionOrder;
use blueprint_types::RevisionRecord;
use camino::Utf8Path;

/// Source of blueprint documents, in stable lexicographic path order.
pub trait DocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<LoadedDocument>>;
}

/// Revision history per document path.
pub trait RevisionSource {
    /// Revisions of `path`. An error is treated by callers as "no history".
    fn revisions(&self, path: &Utf8Path) -> anyhow::Result<Vec<RevisionRecord>>;

    /// Order in which [`revisions`](Self::revisions) returns records.
    fn order(&self) -> RevisionOrder;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
