//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of matched package sets
//! - Structured outdated/skipped information for staleness reports

use crate::domain::{CheckResult, OutdatedReport, PackageSet};
use crate::output::{OutputFormatter, Verbosity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of an extraction result
#[derive(Serialize)]
struct JsonPackages<'a> {
    packages: &'a PackageSet,
}

/// JSON representation of a staleness report
#[derive(Serialize)]
struct JsonReport {
    /// When the check ran
    checked_at: DateTime<Utc>,
    /// Outdated packages
    outdated: Vec<JsonOutdated>,
    /// Packages left out because a lookup was absent
    skipped: Vec<JsonSkip>,
    /// Number of packages found up to date (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    up_to_date: Option<usize>,
}

/// JSON representation of an outdated package
#[derive(Serialize)]
struct JsonOutdated {
    name: String,
    current: String,
    latest: String,
}

/// JSON representation of a skip
#[derive(Serialize)]
struct JsonSkip {
    name: String,
    reason: String,
}

impl OutputFormatter for JsonFormatter {
    fn format_packages(
        &self,
        packages: &PackageSet,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &JsonPackages { packages })?;
        writeln!(writer)
    }

    fn format_report(&self, report: &OutdatedReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let mut outdated = Vec::new();
        let mut skipped = Vec::new();
        let mut up_to_date = 0;

        for result in &report.results {
            match result {
                CheckResult::Outdated {
                    name,
                    current,
                    latest,
                } => outdated.push(JsonOutdated {
                    name: name.clone(),
                    current: current.clone(),
                    latest: latest.clone(),
                }),
                CheckResult::Skipped { name, reason } => skipped.push(JsonSkip {
                    name: name.clone(),
                    reason: reason.to_string(),
                }),
                CheckResult::UpToDate { .. } => up_to_date += 1,
            }
        }

        let output = JsonReport {
            checked_at: report.checked_at,
            outdated,
            skipped,
            up_to_date: (self.verbosity == Verbosity::Verbose).then_some(up_to_date),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
