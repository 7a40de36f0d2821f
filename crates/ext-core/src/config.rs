//! Host configuration read from `extend.toml`
//!
//! Every key is optional; a missing file section falls back to the defaults
//! below.
//!
//! ```toml
//! writeable = true
//! site = "https://market.example.com/"
//! manifest = "extensions/composer.json"
//! platform_version = "1.4.0"
//! server_software = "nginx/1.25"
//! executable = "composer"
//! ```

use std::path::{Path, PathBuf};

use ext_manifest::ManifestOptions;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = "extend.toml";

/// Host configuration for a [`PackageManager`](crate::PackageManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendConfig {
    /// Write gate: setup only runs when the manifest location is writable
    pub writeable: bool,

    /// Base URL of the extension registry
    pub site: String,

    /// Path of the requirement manifest
    pub manifest: PathBuf,

    /// Version the platform is provided as
    pub platform_version: String,

    /// Host runtime identifier reported to the registry
    pub runtime: String,

    /// Web server software reported to the registry
    pub server_software: String,

    /// Dependency tool used by the process-backed executors
    pub executable: String,

    pub minimum_stability: String,
    pub prefer_stable: bool,

    /// Install directory, relative to the manifest
    pub package_dir: Option<String>,
}

impl Default for ExtendConfig {
    fn default() -> Self {
        Self {
            writeable: true,
            site: "https://market.example.com/".to_string(),
            manifest: PathBuf::from("extensions/composer.json"),
            platform_version: env!("CARGO_PKG_VERSION").to_string(),
            runtime: "rust".to_string(),
            server_software: "unknown".to_string(),
            executable: "composer".to_string(),
            minimum_stability: "stable".to_string(),
            prefer_stable: true,
            package_dir: None,
        }
    }
}

impl ExtendConfig {
    /// Parse a configuration from TOML content.
    ///
    /// # Example
    ///
    /// ```
    /// use ext_core::ExtendConfig;
    ///
    /// let config = ExtendConfig::parse(r#"
    /// writeable = false
    /// site = "http://localhost:8080/"
    /// "#).unwrap();
    ///
    /// assert!(!config.writeable);
    /// assert_eq!(config.executable, "composer");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: ExtendConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The registry ping endpoint.
    pub fn ping_url(&self) -> String {
        self.site_path("ping")
    }

    /// The composer repository served by the registry.
    pub fn repository_url(&self) -> String {
        self.site_path("satis/")
    }

    /// Directory the manifest lives in; tools run from here.
    pub fn manifest_dir(&self) -> PathBuf {
        match self.manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Managed manifest settings derived from this configuration.
    pub fn manifest_options(&self) -> ManifestOptions {
        ManifestOptions {
            minimum_stability: self.minimum_stability.clone(),
            prefer_stable: self.prefer_stable,
            repository_url: Some(self.repository_url()),
            platform_version: Some(self.platform_version.clone()),
            package_dir: self.package_dir.clone(),
            ..ManifestOptions::default()
        }
    }

    fn site_path(&self, path: &str) -> String {
        if self.site.ends_with('/') {
            format!("{}{}", self.site, path)
        } else {
            format!("{}/{}", self.site, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(ExtendConfig::parse("").unwrap(), ExtendConfig::default());
    }

    #[test]
    fn default_gate_is_open() {
        let config = ExtendConfig::default();
        assert!(config.writeable);
        assert_eq!(config.server_software, "unknown");
        assert_eq!(config.runtime, "rust");
    }

    #[test]
    fn site_paths_tolerate_missing_trailing_slash() {
        let config = ExtendConfig {
            site: "https://example.com".to_string(),
            ..ExtendConfig::default()
        };
        assert_eq!(config.ping_url(), "https://example.com/ping");
        assert_eq!(config.repository_url(), "https://example.com/satis/");

        let config = ExtendConfig {
            site: "https://example.com/".to_string(),
            ..ExtendConfig::default()
        };
        assert_eq!(config.ping_url(), "https://example.com/ping");
    }

    #[test]
    fn manifest_options_carry_platform_and_repository() {
        let config = ExtendConfig::parse(
            r#"
            site = "https://market.example.com/"
            platform_version = "1.4.0"
            package_dir = "vendor"
            "#,
        )
        .unwrap();

        let options = config.manifest_options();
        assert_eq!(
            options.repository_url.as_deref(),
            Some("https://market.example.com/satis/")
        );
        assert_eq!(options.platform_version.as_deref(), Some("1.4.0"));
        assert_eq!(options.package_dir.as_deref(), Some("vendor"));
        assert_eq!(options.platform_package, "extend/platform");
    }

    #[test]
    fn manifest_dir_defaults_to_current_dir() {
        let config = ExtendConfig {
            manifest: PathBuf::from("composer.json"),
            ..ExtendConfig::default()
        };
        assert_eq!(config.manifest_dir(), PathBuf::from("."));
        assert_eq!(
            ExtendConfig::default().manifest_dir(),
            PathBuf::from("extensions")
        );
    }

    #[test]
    fn invalid_types_are_rejected() {
        let err = ExtendConfig::parse("writeable = \"yes\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn load_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "executable = \"/opt/bin/composer\"\n").unwrap();

        let config = ExtendConfig::load(&path).unwrap();
        assert_eq!(config.executable, "/opt/bin/composer");
    }

    #[test]
    fn load_missing_file_is_config_not_found() {
        let err = ExtendConfig::load(Path::new("/nonexistent/extend.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
