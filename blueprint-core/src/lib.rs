//! Embeddable core library for blueprint collections.
//!
//! Provides clap-free, I/O-abstracted entry points.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DocumentSource`](ports::DocumentSource): enumerate and read documents
//! - [`RevisionSource`](ports::RevisionSource): per-document revision history
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides default filesystem and git backed
//! implementations.
//!
//! # Entry points
//!
//! - [`run_validate`](pipeline::run_validate): syntax, schema and duplicate checks
//! - [`run_process`](pipeline::run_process): derive versions and stamp documents
//! - [`run_catalog`](pipeline::run_catalog): assemble and render the catalog

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-exported so embedders don't need blueprint-collection directly.
pub use blueprint_collection::{DocumentLoadError, LoadedDocument};
