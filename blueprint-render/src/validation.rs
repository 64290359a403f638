use blueprint_types::{DocumentReport, ValidationReport};

pub fn render_validation_md(report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str("# Blueprint validation\n\n");
    out.push_str(&format!("- Mode: `{}`\n", report.mode));
    out.push_str(&format!("- Documents: {}\n", report.documents.len()));
    out.push_str(&format!("- Syntax: {}\n", verdict(report.syntax_ok())));
    out.push_str(&format!("- Schema: {}\n", verdict(report.schema_ok())));
    out.push_str(&format!("- Duplicates: {}\n", verdict(report.duplicates_ok())));
    out.push_str(&format!(
        "- Result: **{}**\n\n",
        if report.passed() { "pass" } else { "fail" }
    ));

    let failed: Vec<&DocumentReport> = report.failed_documents().collect();
    if !failed.is_empty() {
        out.push_str("## Failures\n\n");
        for doc in failed {
            out.push_str(&format!("### `{}`\n\n", doc.path));
            if let Some(err) = &doc.syntax_error {
                out.push_str(&format!("- Syntax: {}\n", err));
            }
            for err in &doc.schema_errors {
                out.push_str(&format!("- Schema: {}\n", err));
            }
            out.push('\n');
        }
    }

    if let Some(dups) = report.duplicates.as_ref().filter(|d| !d.is_empty()) {
        out.push_str("## Duplicate names\n\n");
        for dup in dups {
            out.push_str(&format!(
                "- `{}` in `{}` (first used in `{}`)\n",
                dup.name, dup.conflicting_path, dup.first_path
            ));
        }
        out.push('\n');
    }

    let warned: Vec<&DocumentReport> = report
        .documents
        .iter()
        .filter(|d| !d.missing_recommended_fields.is_empty())
        .collect();
    if !warned.is_empty() {
        out.push_str("## Warnings\n\n");
        for doc in warned {
            out.push_str(&format!(
                "- `{}`: missing recommended fields: {}\n",
                doc.path,
                doc.missing_recommended_fields.join(", ")
            ));
        }
    }

    out
}

fn verdict(ok: Option<bool>) -> &'static str {
    match ok {
        Some(true) => "pass",
        Some(false) => "fail",
        None => "skipped",
    }
}
