//! Registry adapters for fetching the latest stable version of a package
//!
//! This module provides:
//! - HTTP client shared foundation (timeout, User-Agent, status mapping)
//! - crates.io API adapter

mod client;
mod crates_io;

pub use client::HttpClient;
pub use crates_io::{CratesIoAdapter, CRATES_IO_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Read-only query surface over a package registry
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Wait until the registry's pacing allows the next request.
    ///
    /// Called once before every lookup, outside any lookup timeout.
    async fn wait_turn(&self) {}

    /// Latest stable published version of a package.
    ///
    /// `Ok(None)` means the package exists but has no stable release.
    async fn latest_stable_version(&self, package: &str) -> Result<Option<String>, RegistryError>;
}
