//! Configuration discovery and manager construction

use std::path::{Path, PathBuf};

use ext_core::{CONFIG_FILENAME, ExtendConfig, FlashBag, PackageManager};

use crate::error::Result;

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: ExtendConfig,
    /// The file the configuration came from, if any
    pub source: Option<PathBuf>,
}

impl CliContext {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `extend.toml` in `cwd` is
    /// used when present and the defaults otherwise. A relative manifest
    /// path is resolved against the configuration file's directory.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let (mut config, source) = match explicit {
            Some(path) => {
                let path = cwd.join(path);
                (ExtendConfig::load(&path)?, Some(path))
            }
            None => {
                let path = cwd.join(CONFIG_FILENAME);
                if path.is_file() {
                    (ExtendConfig::load(&path)?, Some(path))
                } else {
                    (ExtendConfig::default(), None)
                }
            }
        };

        let base = source
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(cwd)
            .to_path_buf();
        if config.manifest.is_relative() {
            config.manifest = base.join(&config.manifest);
        }

        tracing::debug!(config = ?source, manifest = %config.manifest.display(), "Loaded configuration");
        Ok(Self { config, source })
    }

    /// Build a package manager, collecting setup diagnostics in a flash bag.
    pub fn manager(&self) -> (PackageManager, FlashBag) {
        let flashes = FlashBag::new();
        let manager = PackageManager::builder(self.config.clone())
            .sink(flashes.clone())
            .build();
        (manager, flashes)
    }

    /// Build a package manager that skips setup: no manifest reload, no ping.
    pub fn manager_without_setup(&self) -> PackageManager {
        let mut config = self.config.clone();
        config.writeable = false;
        PackageManager::builder(config).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let ctx = CliContext::load(None, temp.path()).unwrap();

        assert!(ctx.source.is_none());
        assert_eq!(
            ctx.config.manifest,
            temp.path().join("extensions/composer.json")
        );
    }

    #[test]
    fn discovers_config_in_cwd() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            "writeable = false\nmanifest = \"composer.json\"\n",
        )
        .unwrap();

        let ctx = CliContext::load(None, temp.path()).unwrap();

        assert!(!ctx.config.writeable);
        assert_eq!(ctx.config.manifest, temp.path().join("composer.json"));
    }

    #[test]
    fn manifest_is_relative_to_explicit_config() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("etc");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("custom.toml"), "manifest = \"composer.json\"\n").unwrap();

        let ctx = CliContext::load(Some(Path::new("etc/custom.toml")), temp.path()).unwrap();

        assert_eq!(ctx.config.manifest, nested.join("composer.json"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        assert!(CliContext::load(Some(Path::new("missing.toml")), temp.path()).is_err());
    }
}
