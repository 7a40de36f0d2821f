//! Installed package records produced by the `show` action

use serde::{Deserialize, Serialize};

/// A package author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            homepage: None,
            role: None,
        }
    }
}

/// Package metadata as reported by the dependency toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub name: String,
    /// Declared package type; `None` means a plain library
    #[serde(rename = "type", default)]
    pub package_type: Option<String>,
    pub pretty_version: String,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>, pretty_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_type: None,
            pretty_version: pretty_version.into(),
            authors: None,
            keywords: None,
            description: None,
        }
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = Some(authors);
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }
}

/// One installed package with its resolved version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    pub package: PackageMetadata,
    pub version_pretty: String,
}

impl InstalledPackage {
    /// Wrap `package`, resolving to its own pretty version.
    pub fn new(package: PackageMetadata) -> Self {
        let version_pretty = package.pretty_version.clone();
        Self {
            package,
            version_pretty,
        }
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_metadata() {
        let package = PackageMetadata::new("vendor/gallery", "1.2.3")
            .with_type("extension")
            .with_authors(vec![Author::new("Jo Bloggs")])
            .with_keywords(["images", "gallery"]);

        assert_eq!(package.package_type.as_deref(), Some("extension"));
        assert_eq!(package.authors.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            package.keywords,
            Some(vec!["images".to_string(), "gallery".to_string()])
        );
    }

    #[test]
    fn installed_resolves_to_pretty_version() {
        let installed = InstalledPackage::new(PackageMetadata::new("vendor/gallery", "1.2.3"));
        assert_eq!(installed.version_pretty, "1.2.3");
        assert_eq!(installed.name(), "vendor/gallery");
    }
}
