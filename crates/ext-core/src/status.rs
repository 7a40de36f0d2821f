//! Reconciliation of installed packages against declared requirements
//!
//! [`reconcile`] merges the two sets into one status table keyed by package
//! name. Installed packages come first in executor order, followed by
//! requirements that are not installed yet, in manifest order. A name that is
//! both installed and required is reported once, as installed.

use ext_actions::{Author, InstalledPackage};
use indexmap::IndexMap;
use serde::Serialize;

/// Description given to packages that are required but not installed.
pub const PENDING_DESCRIPTION: &str = "Not yet installed.";

/// Type reported for installed packages that declare none.
pub const DEFAULT_PACKAGE_TYPE: &str = "library";

/// Type reported for packages that are not installed.
pub const UNKNOWN_PACKAGE_TYPE: &str = "unknown";

/// Status table keyed by package name.
pub type PackageStatusMap = IndexMap<String, PackageStatusEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Installed,
    Pending,
}

/// One row of the status table.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatusEntry {
    pub status: PackageStatus,
    #[serde(rename = "type")]
    pub package_type: String,
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub authors: Option<Vec<Author>>,
    pub keywords: Option<Vec<String>>,
    pub readme_link: Option<String>,
    pub config_link: Option<String>,
    pub repository_link: Option<String>,
    pub constraint: Option<String>,
    pub valid: bool,
    pub enabled: bool,
}

impl PackageStatusEntry {
    /// Entry for an installed package compatible under `constraint`.
    pub fn installed(installed: &InstalledPackage, constraint: String) -> Self {
        let package = &installed.package;
        Self {
            status: PackageStatus::Installed,
            package_type: package
                .package_type
                .clone()
                .unwrap_or_else(|| DEFAULT_PACKAGE_TYPE.to_string()),
            name: package.name.clone(),
            title: package.name.clone(),
            description: None,
            version: installed.version_pretty.clone(),
            authors: package.authors.clone(),
            keywords: package.keywords.clone(),
            readme_link: None,
            config_link: None,
            repository_link: None,
            constraint: Some(constraint),
            valid: true,
            enabled: true,
        }
    }

    /// Entry for a requirement that is not installed yet.
    pub fn pending(name: &str, constraint: &str) -> Self {
        Self {
            status: PackageStatus::Pending,
            package_type: UNKNOWN_PACKAGE_TYPE.to_string(),
            name: name.to_string(),
            title: name.to_string(),
            description: Some(PENDING_DESCRIPTION.to_string()),
            version: constraint.to_string(),
            authors: Some(Vec::new()),
            keywords: Some(Vec::new()),
            readme_link: None,
            config_link: None,
            repository_link: None,
            constraint: None,
            valid: false,
            enabled: false,
        }
    }
}

/// Answers which platform constraint an installed package resolved against.
pub trait ResolutionStatus {
    fn compatibility_constraint(&self, package: &str) -> String;
}

/// Reports the same platform version for every package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVersion(pub String);

impl PlatformVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl ResolutionStatus for PlatformVersion {
    fn compatibility_constraint(&self, _package: &str) -> String {
        self.0.clone()
    }
}

/// Merge installed packages and requirements into a status table.
pub fn reconcile(
    requirements: &IndexMap<String, String>,
    installed: &[InstalledPackage],
    resolution: &dyn ResolutionStatus,
) -> PackageStatusMap {
    let mut packages = PackageStatusMap::with_capacity(installed.len() + requirements.len());

    for package in installed {
        let constraint = resolution.compatibility_constraint(package.name());
        packages.insert(
            package.name().to_string(),
            PackageStatusEntry::installed(package, constraint),
        );
    }

    for (name, constraint) in requirements {
        if !packages.contains_key(name) {
            packages.insert(name.clone(), PackageStatusEntry::pending(name, constraint));
        }
    }

    packages
}
