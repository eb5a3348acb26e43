//! Staleness checker for coordinating the per-package lookups
//!
//! This module provides:
//! - Workflow coordination: validate → fetch latest → resolve current → judge
//! - Bounded concurrent lookups with a per-lookup timeout
//! - Partial continuation: a failed lookup only skips its own package

use crate::domain::{
    CheckResult, ManifestRef, ManifestRole, OutdatedReport, PackageSet, PackageVersion, SkipReason,
};
use crate::error::{AppError, RegistryError};
use crate::manifest::{self, ManifestIntrospector};
use crate::progress::Progress;
use crate::registry::PackageRegistry;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of packages checked concurrently
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default timeout for a single registry lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the staleness checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Maximum number of packages checked at the same time
    pub concurrency: usize,
    /// Registry lookups exceeding this are treated as absent
    pub lookup_timeout: Duration,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            show_progress: false,
        }
    }
}

/// Compares downstream versions against the registry's latest stable releases
pub struct StalenessChecker {
    registry: Arc<dyn PackageRegistry>,
    introspector: Arc<dyn ManifestIntrospector>,
    config: CheckerConfig,
}

impl StalenessChecker {
    /// Create a new checker with default configuration
    pub fn new(
        registry: Arc<dyn PackageRegistry>,
        introspector: Arc<dyn ManifestIntrospector>,
    ) -> Self {
        Self {
            registry,
            introspector,
            config: CheckerConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: CheckerConfig) -> Self {
        self.config = config;
        self
    }

    /// Packages whose downstream version differs from the latest stable release.
    ///
    /// Fails only when `downstream` is empty or unresolvable. Packages with an
    /// absent lookup are recorded as skipped and never reported as outdated.
    pub async fn find_outdated(
        &self,
        packages: &PackageSet,
        downstream: &ManifestRef,
    ) -> Result<OutdatedReport, AppError> {
        manifest::validate(&*self.introspector, downstream, ManifestRole::Downstream)?;

        if packages.is_empty() {
            debug!("No packages to check");
            return Ok(OutdatedReport::empty());
        }

        let mut progress = Progress::new(self.config.show_progress);
        progress.start(packages.len() as u64, "Checking packages");

        let results: Vec<CheckResult> = {
            let progress = &progress;
            stream::iter(packages.iter())
                .map(|name| async move {
                    let result = self.check_package(name, downstream).await;
                    progress.inc();
                    result
                })
                .buffer_unordered(self.config.concurrency.max(1))
                .collect()
                .await
        };
        progress.finish_and_clear();

        let report = OutdatedReport::from_results(results);
        info!(
            checked = packages.len(),
            outdated = report.outdated_count(),
            skipped = report.skipped_count(),
            "Staleness check finished"
        );
        Ok(report)
    }

    /// Check a single package
    async fn check_package(&self, name: &str, downstream: &ManifestRef) -> CheckResult {
        let latest = match self.lookup_latest(name).await {
            Ok(latest) => latest,
            Err(reason) => return CheckResult::skip(name, reason),
        };

        let current = match self.lookup_current(name, downstream) {
            Ok(current) => current,
            Err(reason) => return CheckResult::skip(name, reason),
        };

        let result = CheckResult::judge(&latest, &current);
        debug!(
            package = name,
            latest = %latest.version,
            current = %current.version,
            outdated = result.is_outdated(),
            "Compared versions"
        );
        result
    }

    /// Latest stable version from the registry, bounded by the lookup timeout
    async fn lookup_latest(&self, name: &str) -> Result<PackageVersion, SkipReason> {
        let registry = self.registry.registry_name();

        // Queuing behind the registry's pacing is not part of the lookup timeout
        self.registry.wait_turn().await;
        let lookup = self.registry.latest_stable_version(name);

        let outcome = match tokio::time::timeout(self.config.lookup_timeout, lookup).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RegistryError::timeout(name, registry)),
        };

        match outcome {
            Ok(version) => PackageVersion::non_empty(name, version).ok_or_else(|| {
                debug!(package = name, "No stable release");
                SkipReason::RegistryAbsent(format!("no stable release on {}", registry))
            }),
            Err(e) => {
                warn!(package = name, error = %e, "Registry lookup absent");
                Err(SkipReason::RegistryAbsent(e.to_string()))
            }
        }
    }

    /// Version currently resolved by the downstream manifest
    fn lookup_current(
        &self,
        name: &str,
        downstream: &ManifestRef,
    ) -> Result<PackageVersion, SkipReason> {
        match self.introspector.resolved_version(downstream, name) {
            Ok(version) => PackageVersion::non_empty(name, version).ok_or_else(|| {
                debug!(package = name, "No resolved version in downstream manifest");
                SkipReason::ManifestAbsent(format!("no resolved version in {}", downstream))
            }),
            Err(e) => {
                warn!(package = name, error = %e, "Manifest lookup absent");
                Err(SkipReason::ManifestAbsent(e.to_string()))
            }
        }
    }
}
