use blueprint_dialect::Node;
use blueprint_types::Domain;

pub const REQUIRED_FIELDS: &[&str] = &["name", "domain"];
pub const RECOMMENDED_FIELDS: &[&str] = &["description", "author"];

/// Outcome of the schema check for one parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCheck {
    pub errors: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_recommended: Vec<String>,
    /// `None` when the `blueprint` mapping could not be inspected.
    pub domain_valid: Option<bool>,
    pub name_valid: Option<bool>,
}

impl SchemaCheck {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Default::default()
        }
    }
}

/// Checks the `blueprint` metadata of a loaded document.
///
/// Missing recommended fields are reported but never fail the check.
pub fn check_schema(root: &Node) -> SchemaCheck {
    if !root.is_mapping() {
        return SchemaCheck::fail("blueprint must be a YAML object");
    }
    let Some(meta) = root.get("blueprint") else {
        return SchemaCheck::fail("missing \"blueprint\" key");
    };
    if !meta.is_mapping() {
        return SchemaCheck::fail("\"blueprint\" must be a YAML object");
    }

    let mut check = SchemaCheck::default();

    for field in REQUIRED_FIELDS {
        if meta.get(field).is_none() {
            check.missing_required.push((*field).to_string());
        }
    }
    if !check.missing_required.is_empty() {
        check.errors.push(format!(
            "missing required fields: {}",
            check.missing_required.join(", ")
        ));
    }

    let domain_valid = match meta.get("domain") {
        None => false,
        Some(node) => match node.as_str().map(str::parse::<Domain>) {
            Some(Ok(_)) => true,
            _ => {
                check.errors.push(format!(
                    "invalid domain \"{}\"; must be one of [{}]",
                    node.to_text(),
                    Domain::expected_values()
                ));
                false
            }
        },
    };
    check.domain_valid = Some(domain_valid);

    let name_valid = match meta.get("name") {
        None => false,
        Some(node) => {
            let valid = node.as_text().is_some_and(|n| !n.trim().is_empty());
            if !valid {
                check
                    .errors
                    .push("blueprint name must be a non-empty string".to_string());
            }
            valid
        }
    };
    check.name_valid = Some(name_valid);

    for field in RECOMMENDED_FIELDS {
        if meta.get(field).is_none() {
            check.missing_recommended.push((*field).to_string());
        }
    }

    check
}
