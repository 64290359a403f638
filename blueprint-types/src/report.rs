use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which validation checks a run performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    All,
    Syntax,
    Schema,
    Duplicates,
}

impl ValidationMode {
    pub fn runs_syntax(self) -> bool {
        matches!(self, ValidationMode::All | ValidationMode::Syntax)
    }

    pub fn runs_schema(self) -> bool {
        matches!(self, ValidationMode::All | ValidationMode::Schema)
    }

    pub fn runs_duplicates(self) -> bool {
        matches!(self, ValidationMode::All | ValidationMode::Duplicates)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::All => "all",
            ValidationMode::Syntax => "syntax",
            ValidationMode::Schema => "schema",
            ValidationMode::Duplicates => "duplicates",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ValidationMode::All),
            "syntax" => Ok(ValidationMode::Syntax),
            "schema" => Ok(ValidationMode::Schema),
            "duplicates" => Ok(ValidationMode::Duplicates),
            other => Err(format!(
                "unknown validation type: {other} (expected syntax, schema or duplicates)"
            )),
        }
    }
}

/// Per-document validation outcome.
///
/// `None` means the corresponding check was not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_ok: Option<bool>,

    /// Raw loader diagnostic when the syntax check failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_ok: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_errors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required_fields: Vec<String>,

    /// Non-fatal.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_recommended_fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_valid: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_valid: Option<bool>,
}

impl DocumentReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// False only when a requested check failed for this document.
    pub fn passed(&self) -> bool {
        self.syntax_ok != Some(false) && self.schema_ok != Some(false)
    }
}

/// Two documents claiming the same blueprint name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateName {
    pub name: String,
    /// The path enumerated first.
    pub first_path: String,
    pub conflicting_path: String,
}

/// Terminal result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub schema: String,
    pub mode: ValidationMode,

    /// In enumeration order.
    #[serde(default)]
    pub documents: Vec<DocumentReport>,

    /// Present when the duplicate check ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<DuplicateName>>,
}

impl ValidationReport {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            schema: crate::schema::VALIDATION_REPORT_V1.to_string(),
            mode,
            documents: Vec::new(),
            duplicates: None,
        }
    }

    pub fn syntax_ok(&self) -> Option<bool> {
        self.mode
            .runs_syntax()
            .then(|| self.documents.iter().all(|d| d.syntax_ok != Some(false)))
    }

    pub fn schema_ok(&self) -> Option<bool> {
        self.mode
            .runs_schema()
            .then(|| self.documents.iter().all(|d| d.schema_ok != Some(false)))
    }

    pub fn duplicates_ok(&self) -> Option<bool> {
        self.duplicates.as_ref().map(|d| d.is_empty())
    }

    /// Conjunction of every requested check across every document.
    pub fn passed(&self) -> bool {
        [self.syntax_ok(), self.schema_ok(), self.duplicates_ok()]
            .into_iter()
            .all(|ok| ok != Some(false))
    }

    pub fn failed_documents(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.passed())
    }
}
