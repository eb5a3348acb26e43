//! crates.io API adapter
//!
//! Fetches the latest stable version of a crate from crates.io.
//! API endpoint: {base}/api/v1/crates/{crate}
//!
//! Note: crates.io requires a User-Agent header (handled by HttpClient)
//! and asks crawlers to stay at 1 request/second. Pacing happens in
//! `wait_turn`, which callers run before each lookup.

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageRegistry};
use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// crates.io base URL
pub const CRATES_IO_URL: &str = "https://crates.io";

/// Rate limit: 1 request per second
const RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(1);

/// crates.io adapter with request pacing
pub struct CratesIoAdapter {
    client: HttpClient,
    base_url: String,
    rate_limit: Duration,
    last_request: Mutex<Option<Instant>>,
}

/// crates.io crate response
#[derive(Debug, Deserialize)]
struct CratesIoResponse {
    /// Crate summary
    #[serde(rename = "crate")]
    krate: CrateInfo,
    /// Published versions
    #[serde(default)]
    versions: Vec<CrateVersion>,
}

/// Crate summary information
#[derive(Debug, Deserialize)]
struct CrateInfo {
    /// Highest non-prerelease, non-yanked version
    #[serde(default)]
    max_stable_version: Option<String>,
}

/// Crate version information
#[derive(Debug, Deserialize)]
struct CrateVersion {
    /// Version number
    num: String,
    /// Whether this version is yanked
    #[serde(default)]
    yanked: bool,
}

impl CratesIoResponse {
    /// Latest stable version, computed from `versions` when the summary lacks it
    fn latest_stable(self) -> Option<String> {
        if let Some(max) = self.krate.max_stable_version.filter(|v| !v.is_empty()) {
            return Some(max);
        }

        self.versions
            .iter()
            .filter(|v| !v.yanked)
            .filter_map(|v| Version::parse(&v.num).ok())
            .filter(|v| v.pre.is_empty())
            .max()
            .map(|v| v.to_string())
    }
}

impl CratesIoAdapter {
    /// Create a new crates.io adapter
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: CRATES_IO_URL.to_string(),
            rate_limit: RATE_LIMIT_INTERVAL,
            last_request: Mutex::new(None),
        }
    }

    /// Point the adapter at a crates.io-compatible API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the minimum interval between requests
    pub fn with_rate_limit(mut self, interval: Duration) -> Self {
        self.rate_limit = interval;
        self
    }

    /// Build the URL for a crate
    fn build_url(&self, crate_name: &str) -> String {
        format!("{}/api/v1/crates/{}", self.base_url, crate_name)
    }

}

#[async_trait]
impl PackageRegistry for CratesIoAdapter {
    fn registry_name(&self) -> &'static str {
        "crates.io"
    }

    async fn wait_turn(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.rate_limit {
                tokio::time::sleep(self.rate_limit - elapsed).await;
            }
        }

        *last_request = Some(Instant::now());
    }

    async fn latest_stable_version(&self, crate_name: &str) -> Result<Option<String>, RegistryError> {
        let url = self.build_url(crate_name);
        let response: CratesIoResponse = self
            .client
            .get_json(&url, crate_name, self.registry_name())
            .await?;

        let latest = response.latest_stable();
        debug!(crate_name, latest = ?latest, "Fetched latest stable version");
        Ok(latest)
    }
}
