//! The JSON requirement manifest
//!
//! The manifest is owned by the external dependency toolchain, so only the
//! keys the package manager reads or manages are modelled. Everything else is
//! captured in [`ManifestDocument::extra`] and written back untouched.
//!
//! ```json
//! {
//!     "name": "local/extensions",
//!     "minimum-stability": "stable",
//!     "prefer-stable": true,
//!     "config": { "discard-changes": true, "preferred-install": "dist" },
//!     "repositories": { "extend": { "type": "composer", "url": "https://market.example.com/satis/" } },
//!     "provide": { "extend/platform": "1.4.0" },
//!     "require": { "vendor/gallery": "^3.0" }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Repository id under which the extension registry is written.
pub const EXTEND_REPOSITORY: &str = "extend";

fn default_minimum_stability() -> String {
    "stable".to_string()
}

fn default_prefer_stable() -> bool {
    true
}

fn default_platform_package() -> String {
    "extend/platform".to_string()
}

/// A package repository entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// The `repositories` section, in either of the shapes the toolchain accepts.
///
/// Entries are kept as raw JSON so repository types this crate does not
/// model (`path`, `package`, ...) survive a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repositories {
    /// `{ "id": { "type": ..., "url": ... } }`
    Keyed(IndexMap<String, Value>),
    /// `[ { "type": ..., "url": ... } ]`, optionally carrying a `name`
    List(Vec<Value>),
}

impl Default for Repositories {
    fn default() -> Self {
        Self::Keyed(IndexMap::new())
    }
}

impl Repositories {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Keyed(map) => map.is_empty(),
            Self::List(list) => list.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::List(list) => list.len(),
        }
    }

    /// Look up a repository by id: the key in the keyed form, the `name`
    /// field in the list form. Entries that are not `type`/`url` pairs
    /// yield `None`.
    pub fn get(&self, id: &str) -> Option<Repository> {
        let entry = match self {
            Self::Keyed(map) => map.get(id),
            Self::List(list) => list.iter().find(|entry| entry_name(entry) == Some(id)),
        }?;
        serde_json::from_value(entry.clone()).ok()
    }

    /// Insert or replace the repository registered under `id`.
    pub fn upsert(&mut self, id: &str, repository: &Repository) {
        match self {
            Self::Keyed(map) => {
                map.insert(
                    id.to_string(),
                    json!({ "type": repository.kind, "url": repository.url }),
                );
            }
            Self::List(list) => {
                let entry = json!({ "name": id, "type": repository.kind, "url": repository.url });
                match list.iter_mut().find(|existing| entry_name(existing) == Some(id)) {
                    Some(existing) => *existing = entry,
                    None => list.push(entry),
                }
            }
        }
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

/// Parsed requirement manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        rename = "minimum-stability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_stability: Option<String>,

    #[serde(rename = "prefer-stable", default, skip_serializing_if = "Option::is_none")]
    pub prefer_stable: Option<bool>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub config: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "Repositories::is_empty")]
    pub repositories: Repositories,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub provide: IndexMap<String, String>,

    /// Declared requirements, `name -> constraint`, in declaration order.
    #[serde(default)]
    pub require: IndexMap<String, String>,

    /// Keys this crate does not manage, preserved verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Options controlling the managed parts of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestOptions {
    #[serde(default = "default_minimum_stability")]
    pub minimum_stability: String,

    #[serde(default = "default_prefer_stable")]
    pub prefer_stable: bool,

    /// Extension registry URL, written as the `extend` composer repository.
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Package name the platform is provided as.
    #[serde(default = "default_platform_package")]
    pub platform_package: String,

    /// Platform version to provide; nothing is provided when unset.
    #[serde(default)]
    pub platform_version: Option<String>,

    /// Install directory for packages (`config.vendor-dir`).
    #[serde(default)]
    pub package_dir: Option<String>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            minimum_stability: default_minimum_stability(),
            prefer_stable: default_prefer_stable(),
            repository_url: None,
            platform_package: default_platform_package(),
            platform_version: None,
            package_dir: None,
        }
    }
}

impl ManifestDocument {
    /// Parse a manifest from JSON content.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// A fresh manifest for a new extension installation.
    pub fn bootstrap(options: &ManifestOptions) -> Self {
        let mut document = Self {
            name: Some("local/extensions".to_string()),
            description: Some("Locally installed extensions".to_string()),
            ..Self::default()
        };
        document.apply_defaults(options);
        document
    }

    /// Apply the managed settings from `options`.
    ///
    /// Stability, repository, platform and vendor-dir settings are owned by
    /// the host and always overwritten. The `discard-changes` and
    /// `preferred-install` config keys are only filled in when absent.
    ///
    /// Returns `true` if the document changed.
    pub fn apply_defaults(&mut self, options: &ManifestOptions) -> bool {
        let before = self.clone();

        self.minimum_stability = Some(options.minimum_stability.clone());
        self.prefer_stable = Some(options.prefer_stable);

        self.config
            .entry("discard-changes".to_string())
            .or_insert(Value::Bool(true));
        self.config
            .entry("preferred-install".to_string())
            .or_insert_with(|| Value::String("dist".to_string()));
        if let Some(dir) = &options.package_dir {
            self.config
                .insert("vendor-dir".to_string(), Value::String(dir.clone()));
        }

        if let Some(url) = &options.repository_url {
            self.repositories.upsert(
                EXTEND_REPOSITORY,
                &Repository {
                    kind: "composer".to_string(),
                    url: url.clone(),
                },
            );
        }

        if let Some(version) = &options.platform_version {
            self.provide
                .insert(options.platform_package.clone(), version.clone());
        }

        *self != before
    }

    /// Serialize with the four-space indentation the toolchain writes.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        buffer.push(b'\n');
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
