//! Per-package staleness decision types

use super::PackageVersion;
use serde::Serialize;
use std::fmt;

/// Reason why a package was left out of the outdated report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Registry returned no usable latest stable version
    RegistryAbsent(String),
    /// Downstream manifest has no resolved version for the package
    ManifestAbsent(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::RegistryAbsent(msg) => write!(f, "registry lookup absent: {}", msg),
            SkipReason::ManifestAbsent(msg) => write!(f, "manifest lookup absent: {}", msg),
        }
    }
}

/// Result of checking a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckResult {
    /// The downstream version differs from the latest stable release
    Outdated {
        name: String,
        current: String,
        latest: String,
    },
    /// Both versions are identical
    UpToDate { name: String, version: String },
    /// One of the lookups was absent
    Skipped { name: String, reason: SkipReason },
}

impl CheckResult {
    /// Compares the two observed versions of one package.
    ///
    /// Any difference counts, including a current version that is newer
    /// than the registry's latest stable one.
    pub fn judge(latest: &PackageVersion, current: &PackageVersion) -> Self {
        if latest.differs_from(current) {
            CheckResult::Outdated {
                name: current.name.clone(),
                current: current.version.clone(),
                latest: latest.version.clone(),
            }
        } else {
            CheckResult::UpToDate {
                name: current.name.clone(),
                version: current.version.clone(),
            }
        }
    }

    /// Creates a Skipped result
    pub fn skip(name: impl Into<String>, reason: SkipReason) -> Self {
        CheckResult::Skipped {
            name: name.into(),
            reason,
        }
    }

    /// Returns the package name
    pub fn name(&self) -> &str {
        match self {
            CheckResult::Outdated { name, .. }
            | CheckResult::UpToDate { name, .. }
            | CheckResult::Skipped { name, .. } => name,
        }
    }

    pub fn is_outdated(&self) -> bool {
        matches!(self, CheckResult::Outdated { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckResult::Skipped { .. })
    }
}
