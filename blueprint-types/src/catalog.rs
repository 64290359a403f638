use crate::domain::Domain;
use crate::version::VersionTuple;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized record for one successfully processed blueprint.
///
/// Emitted once by the processing pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// `name` followed by ` v<version>`.
    pub versioned_name: String,
    pub version: VersionTuple,
    pub domain: Domain,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Path relative to the collection root, `/`-separated.
    pub file_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,

    /// Containing directory relative to the collection root.
    pub category: String,

    #[serde(
        rename = "latest_commit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_revision_id: Option<String>,
}

/// Record of a document the processing pipeline could not version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: String,
    pub reason: String,
}

/// One category of the catalog with its entries sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_blueprints: u64,
    pub total_categories: u64,
    pub total_domains: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// The structured record handed to a page renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub schema: String,

    /// Sorted by category name.
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,

    pub stats: CatalogStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
}

impl CatalogPage {
    pub fn new(categories: Vec<CatalogCategory>, stats: CatalogStats) -> Self {
        Self {
            schema: crate::schema::CATALOG_V1.to_string(),
            categories,
            stats,
            repo_owner: None,
            repo_name: None,
        }
    }

    /// All entries in category order, then name order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }
}
