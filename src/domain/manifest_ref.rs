//! Manifest locators

use crate::error::InvalidInputError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of a Cargo manifest
pub const MANIFEST_FILENAME: &str = "Cargo.toml";

/// Which side of the check a manifest belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestRole {
    /// The library whose packages are consumed
    Upstream,
    /// The project depending on the upstream packages
    Downstream,
}

impl fmt::Display for ManifestRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestRole::Upstream => write!(f, "upstream"),
            ManifestRole::Downstream => write!(f, "downstream"),
        }
    }
}

/// Locator of a Cargo manifest to introspect.
///
/// Accepts either the `Cargo.toml` path itself or the directory holding it.
/// Construction never touches the filesystem; emptiness is rejected by
/// [`ManifestRef::ensure_not_empty`] and existence is left to the introspector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManifestRef {
    locator: PathBuf,
}

impl ManifestRef {
    /// Creates a new manifest reference
    pub fn new(locator: impl Into<PathBuf>) -> Self {
        Self {
            locator: locator.into(),
        }
    }

    /// Returns the locator exactly as given
    pub fn locator(&self) -> &Path {
        &self.locator
    }

    /// Returns true if the locator is empty or whitespace only
    pub fn is_empty(&self) -> bool {
        self.locator.as_os_str().to_string_lossy().trim().is_empty()
    }

    /// Fails with `EmptyLocator` for an empty locator
    pub fn ensure_not_empty(&self, role: ManifestRole) -> Result<(), InvalidInputError> {
        if self.is_empty() {
            return Err(InvalidInputError::empty_locator(role.to_string()));
        }
        Ok(())
    }

    /// Path of the `Cargo.toml` this locator designates
    pub fn manifest_path(&self) -> PathBuf {
        if self.locator.is_dir() {
            self.locator.join(MANIFEST_FILENAME)
        } else {
            self.locator.clone()
        }
    }

    /// Directory containing the manifest
    pub fn manifest_dir(&self) -> PathBuf {
        let path = self.manifest_path();
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl fmt::Display for ManifestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locator.display())
    }
}

impl From<&str> for ManifestRef {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}
