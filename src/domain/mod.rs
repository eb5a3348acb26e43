//! Core domain models for stalecheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Manifest locators and their role (upstream / downstream)
//! - Package name sets produced by the extractor
//! - Package version pairs used during a staleness check
//! - Per-package check results and the final outdated report

mod check_result;
mod manifest_ref;
mod package_set;
mod package_version;
mod report;

pub use check_result::{CheckResult, SkipReason};
pub use manifest_ref::{ManifestRef, ManifestRole, MANIFEST_FILENAME};
pub use package_set::PackageSet;
pub use package_version::PackageVersion;
pub use report::OutdatedReport;
