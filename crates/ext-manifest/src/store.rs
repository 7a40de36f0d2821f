//! Manifest persistence

use std::path::{Path, PathBuf};

use crate::document::{ManifestDocument, ManifestOptions};
use crate::{Error, Result, io};

/// Loads and persists the requirement manifest.
///
/// The package manager calls [`update`](ManifestStore::update) once during
/// setup and [`init`](ManifestStore::init) on explicit bootstrap requests.
pub trait ManifestStore {
    /// Reload the manifest, bringing its managed settings up to date.
    ///
    /// Fails with [`Error::Parse`] when the manifest is structurally corrupt.
    fn update(&self) -> Result<ManifestDocument>;

    /// Create a fresh manifest at `path`.
    fn init(&self, path: &Path, options: &ManifestOptions) -> Result<ManifestDocument>;
}

/// A [`ManifestStore`] backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonManifestStore {
    path: PathBuf,
    options: ManifestOptions,
}

impl JsonManifestStore {
    pub fn new(path: impl Into<PathBuf>, options: ManifestOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// Read and parse the manifest without modifying it.
    pub fn load(&self) -> Result<ManifestDocument> {
        let content = io::read_text(&self.path)?;
        ManifestDocument::parse(&content).map_err(|e| Error::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write(path: &Path, document: &ManifestDocument) -> Result<()> {
        let content = document.to_json_string().map_err(|e| Error::Serialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        io::write_atomic(path, content.as_bytes())
    }
}

impl ManifestStore for JsonManifestStore {
    fn update(&self) -> Result<ManifestDocument> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Manifest missing, bootstrapping");
            return self.init(&self.path, &self.options);
        }

        let mut document = self.load()?;
        if document.apply_defaults(&self.options) {
            Self::write(&self.path, &document)?;
            tracing::info!(path = %self.path.display(), "Updated manifest settings");
        }

        Ok(document)
    }

    fn init(&self, path: &Path, options: &ManifestOptions) -> Result<ManifestDocument> {
        let document = ManifestDocument::bootstrap(options);
        Self::write(path, &document)?;
        tracing::info!(path = %path.display(), "Created manifest");
        Ok(document)
    }
}
