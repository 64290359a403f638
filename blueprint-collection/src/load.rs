use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{Pattern, glob};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Category of a document sitting directly in the collection root.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub path: Utf8PathBuf,
    /// Path relative to the collection root, `/`-separated.
    pub rel_path: Utf8PathBuf,
    pub category: String,
    pub contents: Result<String, DocumentLoadError>,
}

impl LoadedDocument {
    pub fn new(
        path: impl Into<Utf8PathBuf>,
        rel_path: impl Into<Utf8PathBuf>,
        category: impl Into<String>,
        contents: Result<String, DocumentLoadError>,
    ) -> Self {
        Self {
            path: path.into(),
            rel_path: rel_path.into(),
            category: category.into(),
            contents,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentLoadError {
    #[error("io error: {message}")]
    Io { message: String },
}

/// The containing directory of `rel_path`, or `default` at the root.
pub fn category_for(rel_path: &Utf8Path, default: &str) -> String {
    let parent: Vec<&str> = rel_path
        .parent()
        .map(|p| p.components().map(|c| c.as_str()).collect())
        .unwrap_or_default();
    if parent.is_empty() {
        default.to_string()
    } else {
        parent.join("/")
    }
}

/// Lists every file under `root` whose extension is in `extensions`,
/// sorted lexicographically. A missing root yields an empty list.
pub fn enumerate_documents(
    root: &Utf8Path,
    extensions: &[String],
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let escaped_root = Pattern::escape(root.as_str());
    let mut out = Vec::new();

    for ext in extensions {
        let pattern = format!("{escaped_root}/**/*.{}", Pattern::escape(ext));
        debug!(pattern = %pattern, "scanning collection");

        for entry in glob(&pattern).with_context(|| format!("glob {pattern}"))? {
            let path = match entry {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable collection entry");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(path) {
                Ok(p) => out.push(p),
                Err(p) => warn!(path = %p.display(), "skipping non-UTF-8 path"),
            }
        }
    }

    // Plain string order, so `a-b.yaml` precedes `a/x.yaml`.
    out.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    out.dedup();
    Ok(out)
}

/// Enumerates and reads the collection. Read failures are recorded per
/// document and never abort the scan.
pub fn load_documents(
    root: &Utf8Path,
    extensions: &[String],
    default_category: &str,
) -> anyhow::Result<Vec<LoadedDocument>> {
    let paths = enumerate_documents(root, extensions)?;
    let mut out = Vec::with_capacity(paths.len());

    for path in paths {
        let rel_path = path
            .strip_prefix(root)
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let category = category_for(&rel_path, default_category);

        let contents = fs::read_to_string(&path).map_err(|e| DocumentLoadError::Io {
            message: e.to_string(),
        });
        if let Err(e) = &contents {
            warn!(path = %path, error = %e, "failed to read document");
        }

        out.push(LoadedDocument {
            path,
            rel_path,
            category,
            contents,
        });
    }

    Ok(out)
}
