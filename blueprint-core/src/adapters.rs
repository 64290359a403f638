//! Default filesystem and git backed port implementations.

use crate::ports::{DocumentSource, RevisionSource, WritePort};
use anyhow::Context;
use blueprint_collection::LoadedDocument;
use blueprint_semver::RevisionOrder;
use blueprint_types::RevisionRecord;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use std::process::Command;
use tracing::debug;

/// Loads documents from disk via `blueprint_collection::load_documents`.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    pub root: Utf8PathBuf,
    pub extensions: Vec<String>,
    pub default_category: String,
}

impl FsDocumentSource {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            extensions: blueprint_collection::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            default_category: blueprint_collection::DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }
}

impl DocumentSource for FsDocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<LoadedDocument>> {
        blueprint_collection::load_documents(&self.root, &self.extensions, &self.default_category)
            .with_context(|| format!("load documents from {}", self.root))
    }
}

/// In-memory document source for embedding and testing.
///
/// Sorts by path on construction to match `FsDocumentSource`'s ordering.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentSource {
    documents: Vec<LoadedDocument>,
}

impl InMemoryDocumentSource {
    pub fn new(mut documents: Vec<LoadedDocument>) -> Self {
        documents.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()));
        Self { documents }
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn load_documents(&self) -> anyhow::Result<Vec<LoadedDocument>> {
        Ok(self.documents.clone())
    }
}

/// History from `git log --follow`, newest first.
///
/// Untracked files, paths outside a repository and a missing `git` binary
/// all yield an empty history.
#[derive(Debug, Clone)]
pub struct GitLogSource {
    pub repo_root: Utf8PathBuf,
}

impl GitLogSource {
    pub fn new(repo_root: Utf8PathBuf) -> Self {
        Self { repo_root }
    }
}

impl RevisionSource for GitLogSource {
    fn revisions(&self, path: &Utf8Path) -> anyhow::Result<Vec<RevisionRecord>> {
        let target = std::path::absolute(path).with_context(|| format!("resolve {path}"))?;
        let output = match Command::new("git")
            .arg("-C")
            .arg(self.repo_root.as_std_path())
            .args(["log", "--follow", "--format=%h %s", "--"])
            .arg(&target)
            .output()
        {
            Ok(o) => o,
            Err(e) => {
                debug!(path = %path, error = %e, "git unavailable; no history");
                return Ok(Vec::new());
            }
        };

        if !output.status.success() {
            debug!(
                path = %path,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git log failed; no history"
            );
            return Ok(Vec::new());
        }

        Ok(parse_log(&String::from_utf8_lossy(&output.stdout)))
    }

    fn order(&self) -> RevisionOrder {
        RevisionOrder::NewestFirst
    }
}

/// Parses `%h %s` lines. Blank lines are ignored.
pub fn parse_log(stdout: &str) -> Vec<RevisionRecord> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((id, message)) => RevisionRecord::new(id, message),
            None => RevisionRecord::new(line, ""),
        })
        .collect()
}

/// Fixed histories keyed by document path, for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryRevisionSource {
    order: RevisionOrder,
    histories: BTreeMap<Utf8PathBuf, Vec<RevisionRecord>>,
}

impl InMemoryRevisionSource {
    pub fn new(order: RevisionOrder) -> Self {
        Self {
            order,
            histories: BTreeMap::new(),
        }
    }

    pub fn with(mut self, path: impl Into<Utf8PathBuf>, revisions: Vec<RevisionRecord>) -> Self {
        self.histories.insert(path.into(), revisions);
        self
    }
}

impl RevisionSource for InMemoryRevisionSource {
    fn revisions(&self, path: &Utf8Path) -> anyhow::Result<Vec<RevisionRecord>> {
        Ok(self.histories.get(path).cloned().unwrap_or_default())
    }

    fn order(&self) -> RevisionOrder {
        self.order
    }
}

/// History lookups switched off; every document gets the baseline version.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl RevisionSource for NoHistory {
    fn revisions(&self, _path: &Utf8Path) -> anyhow::Result<Vec<RevisionRecord>> {
        Ok(Vec::new())
    }

    fn order(&self) -> RevisionOrder {
        RevisionOrder::OldestFirst
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn doc(path: &str) -> LoadedDocument {
        LoadedDocument::new(path, path, "General", Ok(String::new()))
    }

    #[test]
    fn in_memory_documents_sort_by_path() {
        let source = InMemoryDocumentSource::new(vec![doc("z.yaml"), doc("a.yaml"), doc("m.yaml")]);
        let loaded = source.load_documents().expect("load");
        let paths: Vec<&str> = loaded.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["a.yaml", "m.yaml", "z.yaml"]);
    }

    #[test]
    fn in_memory_documents_sort_as_strings() {
        let source = InMemoryDocumentSource::new(vec![doc("a/x.yaml"), doc("a-b.yaml")]);
        let loaded = source.load_documents().expect("load");
        let paths: Vec<&str> = loaded.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["a-b.yaml", "a/x.yaml"]);
    }

    #[test]
    fn parse_log_splits_id_and_message() {
        let records = parse_log("abc1234 feat: add delay\n\n  def5678 fix: typo  \nfff0000\n");
        assert_eq!(
            records,
            vec![
                RevisionRecord::new("abc1234", "feat: add delay"),
                RevisionRecord::new("def5678", "fix: typo"),
                RevisionRecord::new("fff0000", ""),
            ]
        );
    }

    #[test]
    fn in_memory_revisions_default_to_empty() {
        let source = InMemoryRevisionSource::new(RevisionOrder::NewestFirst)
            .with("a.yaml", vec![RevisionRecord::new("1", "init")]);
        assert_eq!(source.revisions(Utf8Path::new("a.yaml")).expect("a").len(), 1);
        assert!(source.revisions(Utf8Path::new("b.yaml")).expect("b").is_empty());
        assert_eq!(source.order(), RevisionOrder::NewestFirst);
    }

    #[test]
    fn fs_document_source_loads_from_disk() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("blueprints")).expect("utf8");
        std::fs::create_dir_all(root.join("lighting")).expect("mkdir");
        std::fs::write(root.join("lighting").join("motion.yaml"), "x: 1\n").expect("write");

        let source = FsDocumentSource::new(root).with_default_category("Misc");
        let docs = source.load_documents().expect("load");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].category, "lighting");
        assert_eq!(docs[0].rel_path.as_str(), "lighting/motion.yaml");
    }

    #[test]
    fn fs_write_port_writes_and_creates_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let target = root.join("nested").join("file.txt");

        let port = FsWritePort;
        port.write_file(&target, b"hello").expect("write");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "hello");

        let extra_dir = root.join("extra");
        port.create_dir_all(&extra_dir).expect("mkdir");
        assert!(extra_dir.exists());
    }

    #[test]
    fn git_log_source_is_empty_outside_a_repo() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join("a.yaml"), "x: 1\n").expect("write");

        let source = GitLogSource::new(root.clone());
        assert!(source.revisions(&root.join("a.yaml")).expect("revisions").is_empty());
        assert_eq!(source.order(), RevisionOrder::NewestFirst);
    }
}
