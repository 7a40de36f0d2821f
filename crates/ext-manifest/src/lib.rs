//! Requirement manifest handling for Extension Manager
//!
//! Provides the [`ManifestStore`] seam the package manager bootstraps through,
//! the [`ManifestDocument`] model of the JSON manifest consumed by the
//! dependency toolchain, and a file-backed [`JsonManifestStore`].

pub mod document;
pub mod error;
pub mod io;
pub mod store;

/// Default filename of the requirement manifest.
pub const MANIFEST_FILENAME: &str = "composer.json";

pub use document::{ManifestDocument, ManifestOptions, Repositories, Repository};
pub use error::{Error, Result};
pub use store::{JsonManifestStore, ManifestStore};
