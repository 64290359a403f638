use crate::filters::{
    DEFAULT_DESCRIPTION_LENGTH, clean_description, escape_html, truncate_description, url_quote,
};
use blueprint_types::{CatalogEntry, CatalogPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRenderOptions {
    /// Descriptions are cut to this many characters.
    pub description_length: usize,
    /// Directory holding the published documents, relative to the
    /// repository root.
    pub source_dir: String,
    pub branch: String,
}

impl Default for CatalogRenderOptions {
    fn default() -> Self {
        Self {
            description_length: DEFAULT_DESCRIPTION_LENGTH,
            source_dir: "blueprints".to_string(),
            branch: "main".to_string(),
        }
    }
}

pub fn render_catalog_md(page: &CatalogPage, opts: &CatalogRenderOptions) -> String {
    let mut out = String::new();
    out.push_str("# Blueprint catalog\n\n");
    out.push_str(&format!(
        "- Blueprints: {}\n- Categories: {}\n- Domains: {}\n",
        page.stats.total_blueprints, page.stats.total_categories, page.stats.total_domains
    ));
    if let Some(at) = page.stats.generated_at {
        out.push_str(&format!(
            "- Generated: {}\n",
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    out.push('\n');

    if page.categories.is_empty() {
        out.push_str("_No blueprints published._\n");
        return out;
    }

    for category in &page.categories {
        out.push_str(&format!(
            "## {} ({})\n\n",
            escape_html(&category.name),
            category.entries.len()
        ));
        for entry in &category.entries {
            render_entry(&mut out, page, entry, opts);
        }
    }

    out
}

fn render_entry(out: &mut String, page: &CatalogPage, entry: &CatalogEntry, opts: &CatalogRenderOptions) {
    out.push_str(&format!(
        "### {} `v{}`\n\n",
        escape_html(&entry.name),
        entry.version
    ));

    let description = entry
        .description
        .as_deref()
        .map(clean_description)
        .filter(|d| !d.is_empty());
    if let Some(d) = description {
        out.push_str(&format!(
            "{}\n\n",
            escape_html(&truncate_description(&d, opts.description_length))
        ));
    }

    out.push_str(&format!("- Domain: `{}`\n", entry.domain));
    if let Some(author) = &entry.author {
        out.push_str(&format!("- Author: {}\n", escape_html(author)));
    }
    if let Some(min) = &entry.min_version {
        out.push_str(&format!("- Requires Home Assistant {}\n", escape_html(min)));
    }
    if let Some(rev) = &entry.latest_revision_id {
        out.push_str(&format!("- Latest commit: `{}`\n", rev));
    }

    if let (Some(owner), Some(repo)) = (&page.repo_owner, &page.repo_name) {
        let path = url_quote(&format!("{}/{}", opts.source_dir, entry.file_path));
        let source = format!(
            "https://github.com/{}/{}/blob/{}/{}",
            url_quote(owner),
            url_quote(repo),
            url_quote(&opts.branch),
            path
        );
        let raw = format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            owner, repo, opts.branch, path
        );
        out.push_str(&format!("- Source: [{}]({})\n", escape_html(&entry.file_path), source));
        out.push_str(&format!(
            "- Import: [Open in Home Assistant](https://my.home-assistant.io/redirect/blueprint_import/?blueprint_url={})\n",
            url_quote(&raw)
        ));
    } else {
        out.push_str(&format!("- File: `{}`\n", entry.file_path));
    }

    out.push('\n');
}
