use crate::duplicates::DuplicateTracker;
use crate::schema::check_schema;
use blueprint_collection::LoadedDocument;
use blueprint_dialect::{Node, TagRegistry, parse_with};
use blueprint_types::{DocumentReport, ValidationMode, ValidationReport};
use tracing::{debug, info, warn};

/// Runs the requested checks with the built-in dialect tags.
pub fn validate(docs: &[LoadedDocument], mode: ValidationMode) -> ValidationReport {
    Validator::new().validate(docs, mode)
}

pub struct Validator {
    registry: TagRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            registry: TagRegistry::builtin(),
        }
    }

    pub fn with_registry(registry: TagRegistry) -> Self {
        Self { registry }
    }

    /// Checks every document. The report lists documents in the order
    /// given, which must be the stable enumeration order.
    pub fn validate(&self, docs: &[LoadedDocument], mode: ValidationMode) -> ValidationReport {
        let mut report = ValidationReport::new(mode);
        if docs.is_empty() {
            warn!("no blueprint documents found");
        }

        let mut tracker = mode.runs_duplicates().then(DuplicateTracker::new);

        for doc in docs {
            let path = doc.path.to_string();
            let mut entry = DocumentReport::new(path.clone());

            let loaded = match &doc.contents {
                Ok(raw) => parse_with(raw, &self.registry).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match &loaded {
                Ok(root) => {
                    if mode.runs_syntax() {
                        entry.syntax_ok = Some(true);
                    }
                    if mode.runs_schema() {
                        let check = check_schema(root);
                        for missing in &check.missing_recommended {
                            debug!(path = %path, field = %missing, "missing recommended field");
                        }
                        for error in &check.errors {
                            warn!(path = %path, error = %error, "schema check failed");
                        }
                        entry.schema_ok = Some(check.ok());
                        entry.schema_errors = check.errors;
                        entry.missing_required_fields = check.missing_required;
                        entry.missing_recommended_fields = check.missing_recommended;
                        entry.domain_valid = check.domain_valid;
                        entry.name_valid = check.name_valid;
                    }
                    if let Some(tracker) = tracker.as_mut()
                        && let Some(name) = duplicate_key(root)
                        && let Some(dup) = tracker.observe(&name, &path)
                    {
                        warn!(
                            name = %dup.name,
                            first = %dup.first_path,
                            conflicting = %dup.conflicting_path,
                            "duplicate blueprint name"
                        );
                    }
                }
                Err(message) => {
                    warn!(path = %path, error = %message, "document failed to load");
                    if mode.runs_syntax() {
                        entry.syntax_ok = Some(false);
                        entry.syntax_error = Some(message.clone());
                    }
                    if mode.runs_schema() {
                        entry.schema_ok = Some(false);
                        entry.schema_errors = vec![format!("could not load document: {message}")];
                    }
                }
            }

            report.documents.push(entry);
        }

        report.duplicates = tracker.map(DuplicateTracker::into_duplicates);

        info!(
            mode = %mode,
            documents = report.documents.len(),
            passed = report.passed(),
            "validation finished"
        );
        report
    }
}

/// The name used for duplicate detection: `blueprint.name` exactly as
/// loaded, including the empty string.
///
/// Only string (or tagged) names take part; `name: 42` and other non-string
/// scalars are already schema failures and are not paired here.
fn duplicate_key(root: &Node) -> Option<String> {
    root.get("blueprint")?.get("name")?.as_text()
}
