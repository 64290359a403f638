//! Catalog assembly.
//!
//! Pure and deterministic: the same entries in any order produce the same
//! page. Timestamps and repository details are filled in by the caller.

use blueprint_types::{CatalogCategory, CatalogEntry, CatalogPage, CatalogStats};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Groups entries by category (categories sorted), sorts each category by
/// name and computes the aggregate statistics.
///
/// Entries sharing a name are ordered by file path.
pub fn assemble(entries: Vec<CatalogEntry>) -> CatalogPage {
    let stats = summarize(&entries);

    let mut grouped: BTreeMap<String, Vec<CatalogEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.category.clone()).or_default().push(entry);
    }

    let categories: Vec<CatalogCategory> = grouped
        .into_iter()
        .map(|(name, mut entries)| {
            entries.sort_by(|a, b| {
                a.name
                    .cmp(&b.name)
                    .then_with(|| a.file_path.cmp(&b.file_path))
            });
            CatalogCategory { name, entries }
        })
        .collect();

    debug!(
        blueprints = stats.total_blueprints,
        categories = stats.total_categories,
        domains = stats.total_domains,
        "assembled catalog"
    );

    CatalogPage::new(categories, stats)
}

/// Counts of entries, distinct categories and distinct domains.
pub fn summarize(entries: &[CatalogEntry]) -> CatalogStats {
    let categories: BTreeSet<&str> = entries.iter().map(|e| e.category.as_str()).collect();
    let domains: BTreeSet<_> = entries.iter().map(|e| e.domain).collect();

    CatalogStats {
        total_blueprints: entries.len() as u64,
        total_categories: categories.len() as u64,
        total_domains: domains.len() as u64,
        generated_at: None,
    }
}
