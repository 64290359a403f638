//! Validate, process and catalog pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all filesystem and git operations
//! are performed through the port traits.

use crate::ports::{DocumentSource, RevisionSource, WritePort};
use crate::settings::{CatalogSettings, ProcessSettings, ValidateSettings};
use anyhow::Context;
use blueprint_collection::LoadedDocument;
use blueprint_dialect::{BlueprintDocument, LoadError, StructureError};
use blueprint_edit::{FileChange, render_patch, rewrite_name, versioned_name};
use blueprint_render::{CatalogRenderOptions, render_catalog_md, render_validation_md};
use blueprint_semver::{RevisionOrder, VersionStep, derive_version_with_trace};
use blueprint_types::{
    CatalogEntry, CatalogPage, SkippedDocument, ValidationReport, VersionTuple,
};
use blueprint_validate::validate;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use fs_err as fs;
use tracing::{debug, info, warn};

/// Error type for pipeline results. Exit code 1 = checks failed, 2 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("checks failed")]
    ChecksFailed,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::ChecksFailed => 1,
            ToolError::Internal(_) => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Outcome of `run_validate`.
#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub report: ValidationReport,
    pub passed: bool,
}

/// Runs the requested checks over every document.
///
/// Failing checks are not an error: the caller inspects `passed` after
/// writing the report.
pub fn run_validate(
    settings: &ValidateSettings,
    source: &dyn DocumentSource,
) -> Result<ValidateOutcome, ToolError> {
    let docs = source.load_documents()?;
    let report = validate(&docs, settings.mode);
    let passed = report.passed();
    Ok(ValidateOutcome { report, passed })
}

pub fn write_validate_artifacts(
    outcome: &ValidateOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), json.as_bytes())?;

    let md = render_validation_md(&outcome.report);
    writer.write_file(&out_dir.join("report.md"), md.as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// process
// ---------------------------------------------------------------------------

/// A document with its version stamped into the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedDocument {
    pub rel_path: Utf8PathBuf,
    pub contents: String,
    /// False when no `name:` form matched and the text was kept as is.
    pub renamed: bool,
}

/// How one document's version was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTrace {
    pub path: Utf8PathBuf,
    pub version: VersionTuple,
    pub steps: Vec<VersionStep>,
}

/// Outcome of `run_process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    /// In enumeration order.
    pub entries: Vec<CatalogEntry>,
    pub documents: Vec<StampedDocument>,
    pub skipped: Vec<SkippedDocument>,
    pub traces: Vec<VersionTrace>,
    /// Unified diff of every rename.
    pub patch: String,
}

/// Derives a version for every structurally valid document and stamps it
/// into the document's name.
///
/// Per-document failures are logged and recorded in `skipped`; they never
/// abort the batch.
pub fn run_process(
    source: &dyn DocumentSource,
    revisions: &dyn RevisionSource,
) -> Result<ProcessOutcome, ToolError> {
    let docs = source.load_documents()?;
    let mut outcome = ProcessOutcome::default();
    let mut changes = Vec::new();

    for doc in &docs {
        match process_document(doc, revisions) {
            Ok(processed) => {
                info!(
                    path = %doc.path,
                    version = %processed.entry.version,
                    "versioned blueprint"
                );
                changes.push(FileChange {
                    path: doc.rel_path.clone(),
                    before: processed.before,
                    after: processed.stamped.contents.clone(),
                });
                outcome.entries.push(processed.entry);
                outcome.documents.push(processed.stamped);
                outcome.traces.push(processed.trace);
            }
            Err(reason) => {
                outcome.skipped.push(SkippedDocument {
                    path: doc.path.to_string(),
                    reason,
                });
            }
        }
    }

    outcome.patch = render_patch(&changes);

    info!(
        processed = outcome.entries.len(),
        skipped = outcome.skipped.len(),
        "processing finished"
    );
    Ok(outcome)
}

struct Processed {
    before: String,
    stamped: StampedDocument,
    entry: CatalogEntry,
    trace: VersionTrace,
}

fn process_document(doc: &LoadedDocument, revisions: &dyn RevisionSource) -> Result<Processed, String> {
    let raw = match &doc.contents {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %doc.path, error = %e, "skipping unreadable document");
            return Err(e.to_string());
        }
    };

    let blueprint = match BlueprintDocument::parse(raw) {
        Ok(b) => b,
        Err(LoadError::Structure(
            e @ (StructureError::NotAMapping | StructureError::MissingBlueprint),
        )) => {
            debug!(path = %doc.path, error = %e, "not a blueprint");
            return Err(e.to_string());
        }
        Err(e) => {
            warn!(path = %doc.path, error = %e, "skipping invalid blueprint");
            return Err(e.to_string());
        }
    };

    let history = revisions.revisions(&doc.path).unwrap_or_else(|e| {
        warn!(path = %doc.path, error = %e, "history unavailable; using baseline");
        Vec::new()
    });
    let order = revisions.order();
    let steps = derive_version_with_trace(&history, order);
    let version = steps.last().map_or(VersionTuple::BASELINE, |s| s.version);
    let latest = match order {
        RevisionOrder::NewestFirst => history.first(),
        RevisionOrder::OldestFirst => history.last(),
    };

    let (contents, renamed) = match rewrite_name(raw, &blueprint.name, &version) {
        Ok((text, _)) => (text, true),
        Err(e) => {
            warn!(path = %doc.path, error = %e, "name left unversioned");
            (raw.clone(), false)
        }
    };

    let entry = CatalogEntry {
        versioned_name: versioned_name(&blueprint.name, &version),
        name: blueprint.name,
        version,
        domain: blueprint.domain,
        description: blueprint.description,
        author: blueprint.author,
        file_path: doc.rel_path.to_string(),
        min_version: blueprint.min_version,
        category: doc.category.clone(),
        latest_revision_id: latest.map(|r| r.id.clone()),
    };

    Ok(Processed {
        before: raw.clone(),
        stamped: StampedDocument {
            rel_path: doc.rel_path.clone(),
            contents,
            renamed,
        },
        entry,
        trace: VersionTrace {
            path: doc.path.clone(),
            version,
            steps,
        },
    })
}

pub fn write_process_artifacts(
    outcome: &ProcessOutcome,
    settings: &ProcessSettings,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let docs_dir = settings.out_dir.join(&settings.blueprints_subdir);
    writer.create_dir_all(&docs_dir)?;

    for doc in &outcome.documents {
        writer.write_file(&docs_dir.join(&doc.rel_path), doc.contents.as_bytes())?;
    }

    let json = serde_json::to_string_pretty(&outcome.entries).context("serialize catalog entries")?;
    writer.write_file(&settings.catalog_path(), json.as_bytes())?;

    if settings.write_diff {
        writer.write_file(
            &settings.out_dir.join("versioning.diff"),
            outcome.patch.as_bytes(),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

/// Reads the entry list written by `write_process_artifacts`.
pub fn load_catalog_entries(path: &Utf8Path) -> anyhow::Result<Vec<CatalogEntry>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parse catalog entries from {}", path))
}

/// Outcome of `run_catalog`.
#[derive(Debug, Clone)]
pub struct CatalogOutcome {
    pub page: CatalogPage,
    pub markdown: String,
}

/// Assembles and renders the catalog page.
///
/// `generated_at` is the only wall-clock input; the rest is a pure
/// function of `entries`.
pub fn run_catalog(
    settings: &CatalogSettings,
    entries: Vec<CatalogEntry>,
    generated_at: DateTime<Utc>,
) -> CatalogOutcome {
    let mut page = blueprint_catalog::assemble(entries);
    page.stats.generated_at = Some(generated_at);
    page.repo_owner = Some(settings.repo_owner.clone());
    page.repo_name = Some(settings.repo_name.clone());

    let opts = CatalogRenderOptions {
        description_length: settings.description_length,
        source_dir: settings.source_dir.clone(),
        ..Default::default()
    };
    let markdown = render_catalog_md(&page, &opts);

    CatalogOutcome { page, markdown }
}

pub fn write_catalog_artifacts(
    outcome: &CatalogOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let json = serde_json::to_string_pretty(&outcome.page).context("serialize catalog")?;
    writer.write_file(&out_dir.join("catalog.json"), json.as_bytes())?;
    writer.write_file(&out_dir.join("catalog.md"), outcome.markdown.as_bytes())?;
    Ok(())
}
