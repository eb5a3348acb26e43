//! Orchestrator for coordinating a stalecheck run
//!
//! This module provides:
//! - Construction of the registry client and manifest introspector from CLI options
//! - Subcommand dispatch: extract → check, or either stage alone
//! - Rendering of the outcome and the resulting exit code

use crate::checker::{CheckerConfig, StalenessChecker};
use crate::cli::{CliArgs, Command};
use crate::domain::{OutdatedReport, PackageSet};
use crate::error::{AppError, RegistryError};
use crate::extract::extract_dependencies;
use crate::manifest::{CargoIntrospector, ManifestIntrospector};
use crate::output::OutputFormatter;
use crate::registry::{CratesIoAdapter, HttpClient, PackageRegistry};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Exit code used by `--fail-on-outdated` when the report is non-empty
pub const EXIT_OUTDATED: u8 = 3;

/// Result of a successful run
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Upstream packages the downstream project depends on
    Packages(PackageSet),
    /// Staleness report for a package set
    Report(OutdatedReport),
}

impl Outcome {
    /// Write the outcome with the given formatter
    pub fn write(&self, formatter: &dyn OutputFormatter, writer: &mut dyn Write) -> std::io::Result<()> {
        match self {
            Outcome::Packages(packages) => formatter.format_packages(packages, writer),
            Outcome::Report(report) => formatter.format_report(report, writer),
        }
    }

    /// Process exit status for this outcome
    pub fn exit_status(&self, fail_on_outdated: bool) -> u8 {
        match self {
            Outcome::Report(report) if fail_on_outdated && !report.is_clean() => EXIT_OUTDATED,
            _ => 0,
        }
    }
}

/// Orchestrator for coordinating the extract and check workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Manifest introspection
    introspector: Arc<dyn ManifestIntrospector>,
    /// Registry queries
    registry: Arc<dyn PackageRegistry>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Result<Self, RegistryError> {
        let client = HttpClient::with_timeout(args.timeout)?;

        let mut adapter = CratesIoAdapter::new(client);
        if let Some(url) = &args.registry_url {
            debug!(url = %url, "Using custom registry");
            adapter = adapter.with_base_url(url.as_str());
        }
        if let Some(interval) = args.rate_limit() {
            adapter = adapter.with_rate_limit(interval);
        }

        Ok(Self::with_components(
            args,
            Arc::new(CargoIntrospector::new()),
            Arc::new(adapter),
        ))
    }

    /// Create an orchestrator with custom components (for testing)
    pub fn with_components(
        args: CliArgs,
        introspector: Arc<dyn ManifestIntrospector>,
        registry: Arc<dyn PackageRegistry>,
    ) -> Self {
        Self {
            args,
            introspector,
            registry,
        }
    }

    /// Run the requested subcommand
    pub async fn run(&self) -> Result<Outcome, AppError> {
        let command = &self.args.command;
        let downstream = command.downstream();

        match command {
            Command::GetLibs { .. } => {
                let packages = self.extract(command)?;
                Ok(Outcome::Packages(packages))
            }
            Command::GetOutdatedLibs { .. } => {
                let packages = command.names().unwrap_or_default();
                info!(count = packages.len(), "Checking named packages");
                let report = self.checker().find_outdated(&packages, &downstream).await?;
                Ok(Outcome::Report(report))
            }
            Command::Check { .. } => {
                let packages = self.extract(command)?;
                let report = self.checker().find_outdated(&packages, &downstream).await?;
                Ok(Outcome::Report(report))
            }
        }
    }

    fn extract(&self, command: &Command) -> Result<PackageSet, AppError> {
        let upstream = command.upstream().unwrap_or_default();
        extract_dependencies(&*self.introspector, &upstream, &command.downstream())
    }

    fn checker(&self) -> StalenessChecker {
        StalenessChecker::new(Arc::clone(&self.registry), Arc::clone(&self.introspector))
            .with_config(self.checker_config())
    }

    /// Checker configuration derived from the CLI options
    fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            concurrency: usize::from(self.args.concurrency),
            lookup_timeout: self.args.timeout,
            show_progress: self.args.show_progress(),
        }
    }
}
