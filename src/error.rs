//! Application error types using thiserror
//!
//! Error hierarchy:
//! - InvalidInputError: A required manifest locator is missing or unresolvable (fatal)
//! - ManifestError: Issues with reading or parsing a Cargo manifest
//! - RegistryError: Issues with package registry communication (never fatal to a scan)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing required input
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised when a required manifest locator cannot be used
#[derive(Error, Debug)]
pub enum InvalidInputError {
    /// The locator argument was empty
    #[error("{role} manifest path must not be empty")]
    EmptyLocator { role: String },

    /// The locator does not point at a manifest
    #[error("{role} manifest not found: {path}")]
    Unresolvable { role: String, path: PathBuf },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error (Cargo.toml, Cargo.lock)
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A workspace member listed in the manifest has no Cargo.toml
    #[error("workspace member '{member}' of {path} has no Cargo.toml")]
    MissingMember { path: PathBuf, member: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

impl InvalidInputError {
    /// Creates a new EmptyLocator error
    pub fn empty_locator(role: impl Into<String>) -> Self {
        InvalidInputError::EmptyLocator { role: role.into() }
    }

    /// Creates a new Unresolvable error
    pub fn unresolvable(role: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        InvalidInputError::Unresolvable {
            role: role.into(),
            path: path.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingMember error
    pub fn missing_member(path: impl Into<PathBuf>, member: impl Into<String>) -> Self {
        ManifestError::MissingMember {
            path: path.into(),
            member: member.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
