//! Configuration file loading for blueprints.
//!
//! Discovers and loads `blueprints.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use blueprint_core::settings::repo_from_slug;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "blueprints.toml";

/// Top-level configuration from blueprints.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlueprintsConfig {
    pub collection: CollectionConfig,
    pub output: OutputConfig,
    pub catalog: CatalogConfig,
    pub history: HistoryConfig,
}

/// Where the source documents live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Collection directory, relative to the repository root.
    pub dir: String,

    /// File extensions to pick up, without the dot.
    pub extensions: Vec<String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            dir: "blueprints".to_string(),
            extensions: vec!["yaml".to_string(), "yml".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the repository root.
    pub dir: String,

    /// Subdirectory of `dir` receiving stamped documents.
    pub blueprints_subdir: String,

    /// Catalog entry list written by `process`, relative to `dir`.
    pub catalog_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "dist".to_string(),
            blueprints_subdir: "blueprints".to_string(),
            catalog_file: "blueprint_info.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Category of documents sitting directly in the collection directory.
    pub default_category: String,

    /// Descriptions longer than this are cut with `...`.
    pub description_length: usize,

    /// Falls back to `GITHUB_REPOSITORY`.
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_category: "General".to_string(),
            description_length: 200,
            repo_owner: None,
            repo_name: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Derive versions from `git log`. When off, every document is 1.0.0.
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Discover the blueprints.toml config file.
///
/// Returns `None` if no config file is found in `repo_root`.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a blueprints.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<BlueprintsConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<BlueprintsConfig> {
    let config: BlueprintsConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<BlueprintsConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(BlueprintsConfig::default()),
    }
}

/// Values given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub collection_dir: Option<Utf8PathBuf>,
    pub out_dir: Option<Utf8PathBuf>,
    pub no_history: bool,
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub description_length: Option<usize>,
}

/// Merged configuration combining config file, environment and CLI
/// arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub collection_dir: Utf8PathBuf,
    /// Collection directory as written, for catalog links.
    pub source_dir: String,
    pub extensions: Vec<String>,
    pub default_category: String,
    pub out_dir: Utf8PathBuf,
    pub blueprints_subdir: String,
    pub catalog_file: String,
    pub description_length: usize,
    pub repo_owner: String,
    pub repo_name: String,
    pub history_enabled: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: BlueprintsConfig,
    repo_root: Utf8PathBuf,
    github_repository: Option<String>,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    ///
    /// Relative config paths resolve against `repo_root`.
    pub fn new(config: BlueprintsConfig, repo_root: &Utf8Path) -> Self {
        Self {
            config,
            repo_root: repo_root.to_path_buf(),
            github_repository: None,
        }
    }

    /// The `owner/name` slug used when neither CLI nor config names the
    /// repository.
    pub fn with_github_repository(mut self, slug: Option<String>) -> Self {
        self.github_repository = slug;
        self
    }

    pub fn merge(self, cli: CliOverrides) -> MergedConfig {
        let (env_owner, env_name) = repo_from_slug(self.github_repository.as_deref());

        let (collection_dir, source_dir) = match cli.collection_dir {
            Some(dir) => (dir.clone(), dir.to_string()),
            None => (
                self.repo_root.join(&self.config.collection.dir),
                self.config.collection.dir.clone(),
            ),
        };

        MergedConfig {
            collection_dir,
            source_dir,
            extensions: self.config.collection.extensions,
            default_category: self.config.catalog.default_category,
            out_dir: cli
                .out_dir
                .unwrap_or_else(|| self.repo_root.join(&self.config.output.dir)),
            blueprints_subdir: self.config.output.blueprints_subdir,
            catalog_file: self.config.output.catalog_file,
            description_length: cli
                .description_length
                .unwrap_or(self.config.catalog.description_length),
            repo_owner: cli
                .repo_owner
                .or(self.config.catalog.repo_owner)
                .unwrap_or(env_owner),
            repo_name: cli
                .repo_name
                .or(self.config.catalog.repo_name)
                .unwrap_or(env_name),
            history_enabled: self.config.history.enabled && !cli.no_history,
        }
    }
}
