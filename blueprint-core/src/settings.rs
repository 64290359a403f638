//! Clap-free settings for the validate, process and catalog pipelines.

use blueprint_types::ValidationMode;
use camino::Utf8PathBuf;

pub const FALLBACK_REPO_OWNER: &str = "your-username";
pub const FALLBACK_REPO_NAME: &str = "ha-blueprints";

/// Settings for the validate pipeline.
#[derive(Debug, Clone, Default)]
pub struct ValidateSettings {
    pub mode: ValidationMode,
}

/// Settings for the process pipeline.
#[derive(Debug, Clone)]
pub struct ProcessSettings {
    pub out_dir: Utf8PathBuf,
    /// Stamped documents land in `out_dir/blueprints_subdir/<relative path>`.
    pub blueprints_subdir: String,
    /// Catalog entry list, relative to `out_dir`.
    pub catalog_file: String,
    /// Also write `versioning.diff`.
    pub write_diff: bool,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("dist"),
            blueprints_subdir: "blueprints".to_string(),
            catalog_file: "blueprint_info.json".to_string(),
            write_diff: false,
        }
    }
}

impl ProcessSettings {
    pub fn catalog_path(&self) -> Utf8PathBuf {
        self.out_dir.join(&self.catalog_file)
    }
}

/// Settings for the catalog pipeline.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub out_dir: Utf8PathBuf,
    pub description_length: usize,
    /// Directory holding the source documents, for links.
    pub source_dir: String,
    pub repo_owner: String,
    pub repo_name: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("dist"),
            description_length: 200,
            source_dir: "blueprints".to_string(),
            repo_owner: FALLBACK_REPO_OWNER.to_string(),
            repo_name: FALLBACK_REPO_NAME.to_string(),
        }
    }
}

/// Splits an `owner/name` repository slug such as `GITHUB_REPOSITORY`.
///
/// A slug without `/` still names the owner; missing parts fall back to
/// placeholders.
pub fn repo_from_slug(slug: Option<&str>) -> (String, String) {
    let slug = slug.map(str::trim).filter(|s| !s.is_empty());
    let owner = slug
        .map(|s| s.split('/').next().unwrap_or(s))
        .filter(|o| !o.is_empty())
        .unwrap_or(FALLBACK_REPO_OWNER);
    let name = slug
        .and_then(|s| s.split('/').nth(1))
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_REPO_NAME);
    (owner.to_string(), name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_splits_into_owner_and_name() {
        assert_eq!(
            repo_from_slug(Some("someone/ha-blueprints-extra")),
            ("someone".to_string(), "ha-blueprints-extra".to_string())
        );
    }

    #[test]
    fn missing_slug_falls_back() {
        assert_eq!(
            repo_from_slug(None),
            ("your-username".to_string(), "ha-blueprints".to_string())
        );
        assert_eq!(repo_from_slug(Some("")), repo_from_slug(None));
    }

    #[test]
    fn owner_only_slug_keeps_owner() {
        assert_eq!(
            repo_from_slug(Some("someone")),
            ("someone".to_string(), "ha-blueprints".to_string())
        );
    }

    #[test]
    fn catalog_path_joins_out_dir() {
        assert_eq!(ProcessSettings::default().catalog_path().as_str(), "dist/blueprint_info.json");
    }
}
