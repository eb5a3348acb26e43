//! Package name paired with a version string

use serde::Serialize;
use std::fmt;

/// A package name with one observed version.
///
/// During a check there are two per package: the registry's latest stable
/// version and the version resolved for the downstream manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVersion {
    /// Package name
    pub name: String,
    /// Version string, compared verbatim
    pub version: String,
}

impl PackageVersion {
    /// Creates a new package version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Keeps the pair only when the version is non-empty
    pub fn non_empty(name: impl Into<String>, version: Option<String>) -> Option<Self> {
        version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| Self::new(name, v))
    }

    /// Exact string comparison of the two versions
    pub fn differs_from(&self, other: &PackageVersion) -> bool {
        self.version != other.version
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
