//! Final report of a staleness check

use super::CheckResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of checking a package set against the registry.
///
/// Results are kept sorted by package name so that identical inputs
/// always produce identical output.
#[derive(Debug, Clone, Serialize)]
pub struct OutdatedReport {
    /// When the check ran
    pub checked_at: DateTime<Utc>,
    /// Per-package results, sorted by name
    pub results: Vec<CheckResult>,
}

impl OutdatedReport {
    /// Builds a report from unordered per-package results
    pub fn from_results(mut results: Vec<CheckResult>) -> Self {
        results.sort_by(|a, b| a.name().cmp(b.name()));
        Self {
            checked_at: Utc::now(),
            results,
        }
    }

    /// Creates an empty report
    pub fn empty() -> Self {
        Self::from_results(Vec::new())
    }

    /// Returns the outdated results
    pub fn outdated(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.is_outdated())
    }

    /// Returns the skipped results
    pub fn skipped(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.is_skipped())
    }

    /// Names of outdated packages in lexical order
    pub fn names(&self) -> Vec<&str> {
        self.outdated().map(CheckResult::name).collect()
    }

    pub fn outdated_count(&self) -> usize {
        self.outdated().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// Returns true if no package is outdated
    pub fn is_clean(&self) -> bool {
        self.outdated_count() == 0
    }
}
