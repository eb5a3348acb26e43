//! Cargo.lock lookup for resolved package versions

use crate::error::ManifestError;
use semver::{Version, VersionReq};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of a Cargo lockfile
pub const LOCKFILE_FILENAME: &str = "Cargo.lock";

/// Parsed Cargo.lock
#[derive(Debug, Default, Deserialize)]
pub struct Lockfile {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

/// A `[[package]]` entry
#[derive(Debug, Clone, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

impl Lockfile {
    /// Parse lockfile content; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|e| ManifestError::toml_parse_error(path, e.to_string()))
    }

    /// Read and parse a lockfile
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(&content, path)
    }

    /// The Cargo.lock of a workspace root, if one has been generated
    pub fn find(workspace_root: &Path) -> Option<PathBuf> {
        Some(workspace_root.join(LOCKFILE_FILENAME)).filter(|path| path.is_file())
    }

    /// All locked versions of a package
    pub fn versions_of(&self, name: &str) -> Vec<&str> {
        self.package
            .iter()
            .filter(|p| p.name == name)
            .map(|p| p.version.as_str())
            .collect()
    }

    /// Pick the locked version of `name` that the downstream uses.
    ///
    /// With several locked versions, the highest one satisfying one of the
    /// declared requirements wins, then the highest overall.
    pub fn resolve(&self, name: &str, requirements: &[String]) -> Option<String> {
        let raw = self.versions_of(name);
        if raw.len() <= 1 {
            return raw.first().map(|v| v.to_string());
        }

        let parsed: Vec<Version> = raw.iter().filter_map(|v| Version::parse(v).ok()).collect();
        let reqs: Vec<VersionReq> = requirements
            .iter()
            .filter_map(|r| VersionReq::parse(r).ok())
            .collect();

        parsed
            .iter()
            .filter(|v| reqs.iter().any(|req| req.matches(v)))
            .max()
            .or_else(|| parsed.iter().max())
            .map(Version::to_string)
            .or_else(|| raw.first().map(|v| v.to_string()))
    }
}
