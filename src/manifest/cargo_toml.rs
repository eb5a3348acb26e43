//! Cargo.toml model for shallow introspection
//!
//! Handles:
//! - [package] name
//! - [workspace] members / exclude / dependencies
//! - dependencies, dev-dependencies, build-dependencies
//! - Target-specific dependency tables
//! - Inline table format: { version = "1.0", package = "real-name" }

use crate::error::ManifestError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub(crate) type DependencyTable = BTreeMap<String, DependencyEntry>;

/// Subset of a Cargo manifest needed to list packages and dependency edges
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CargoManifest {
    #[serde(default)]
    pub package: Option<PackageSection>,
    #[serde(default)]
    pub workspace: Option<WorkspaceSection>,
    #[serde(default)]
    dependencies: DependencyTable,
    #[serde(default)]
    dev_dependencies: DependencyTable,
    #[serde(default)]
    build_dependencies: DependencyTable,
    #[serde(default)]
    target: BTreeMap<String, TargetSection>,
}

/// [package] section
#[derive(Debug, Deserialize)]
pub struct PackageSection {
    pub name: String,
}

/// [workspace] section
#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceSection {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub(crate) dependencies: DependencyTable,
}

/// [target.'cfg(..)'] section
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TargetSection {
    #[serde(default)]
    dependencies: DependencyTable,
    #[serde(default)]
    dev_dependencies: DependencyTable,
    #[serde(default)]
    build_dependencies: DependencyTable,
}

/// A single dependency value
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum DependencyEntry {
    /// Simple string: package = "1.0.0"
    Version(String),
    /// Inline or dotted table: package = { version = "1.0.0", ... }
    Detailed(DetailedDependency),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailedDependency {
    version: Option<String>,
    package: Option<String>,
}

/// A dependency edge declared directly in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    /// Registry package name (the `package` key wins over the table key)
    pub name: String,
    /// Version requirement, if the edge carries one
    pub requirement: Option<String>,
}

impl DeclaredDependency {
    /// The single version named by the requirement, if it names exactly one.
    ///
    /// `=1.2.3`, `^1.2.3`, `~1.2.3` and `1.2.3` yield `1.2.3`; partial
    /// versions, ranges and wildcards yield `None`.
    pub fn pinned_version(&self) -> Option<String> {
        let req = self.requirement.as_deref()?.trim();
        let bare = req
            .strip_prefix('=')
            .or_else(|| req.strip_prefix('^'))
            .or_else(|| req.strip_prefix('~'))
            .unwrap_or(req)
            .trim();
        semver::Version::parse(bare).ok().map(|v| v.to_string())
    }
}

impl CargoManifest {
    /// Parse manifest content; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|e| ManifestError::toml_parse_error(path, e.to_string()))
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(&content, path)
    }

    /// Name of the package this manifest defines, if any
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.name.as_str())
    }

    /// All dependency edges declared in this manifest, without resolution
    pub fn declared_dependencies(&self) -> Vec<DeclaredDependency> {
        let mut output = Vec::new();

        collect(&self.dependencies, &mut output);
        collect(&self.dev_dependencies, &mut output);
        collect(&self.build_dependencies, &mut output);

        for target in self.target.values() {
            collect(&target.dependencies, &mut output);
            collect(&target.dev_dependencies, &mut output);
            collect(&target.build_dependencies, &mut output);
        }

        if let Some(workspace) = &self.workspace {
            collect(&workspace.dependencies, &mut output);
        }

        output
    }
}

fn collect(table: &DependencyTable, output: &mut Vec<DeclaredDependency>) {
    for (key, entry) in table {
        let (name, requirement) = match entry {
            DependencyEntry::Version(req) => (key.clone(), Some(req.clone())),
            DependencyEntry::Detailed(detail) => (
                detail.package.clone().unwrap_or_else(|| key.clone()),
                detail.version.clone(),
            ),
        };
        output.push(DeclaredDependency { name, requirement });
    }
}
