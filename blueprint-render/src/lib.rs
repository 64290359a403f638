//! Rendering helpers (markdown) for human-readable artifacts.

mod catalog;
pub mod filters;
mod validation;

pub use catalog::{CatalogRenderOptions, render_catalog_md};
pub use filters::{clean_description, escape_html, truncate_description, url_quote};
pub use validation::render_validation_md;
