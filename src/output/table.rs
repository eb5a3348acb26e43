//! Table output formatter for human-readable display
//!
//! This module provides:
//! - Aligned, colored outdated package lines (`name current → latest`)
//! - Semantic version change type indication (major/minor/patch)
//! - Skipped package display with reasons in verbose mode
//! - Summary line

use crate::domain::{CheckResult, OutdatedReport, PackageSet};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use semver::Version;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(current: &str, latest: &str) -> Self {
        match (Version::parse(current), Version::parse(latest)) {
            (Ok(current), Ok(latest)) => {
                if current.major != latest.major {
                    VersionChangeType::Major
                } else if current.minor != latest.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }

    /// Get the display label with color
    fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => self.label().red().bold().to_string(),
            VersionChangeType::Minor => self.label().yellow().to_string(),
            VersionChangeType::Patch => self.label().green().to_string(),
            VersionChangeType::Unknown => self.label().dimmed().to_string(),
        }
    }
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new table formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Format a single outdated line
    fn format_outdated_line(
        &self,
        name: &str,
        current: &str,
        latest: &str,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let change_type = VersionChangeType::from_versions(current, latest);

        if self.color {
            writeln!(
                writer,
                "  {} {} {} {} [{}]",
                format!("{:width$}", name, width = width).bold(),
                current.dimmed(),
                "→".dimmed(),
                latest.bright_white().bold(),
                change_type.colored_label()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}]",
                name,
                current,
                latest,
                change_type.label(),
                width = width
            )
        }
    }

    /// Format a single skip line
    fn format_skip_line(
        &self,
        name: &str,
        reason: &str,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            writeln!(
                writer,
                "  {} {}",
                format!("{:width$}", name, width = width).dimmed(),
                format!("({})", reason).dimmed()
            )
        } else {
            writeln!(writer, "  {:width$} ({})", name, reason, width = width)
        }
    }

    fn format_summary(&self, report: &OutdatedReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let outdated = report.outdated_count();
        let skipped = report.skipped_count();
        let checked = report.results.len();

        let mut line = format!("{} outdated, {} checked", outdated, checked);
        if skipped > 0 {
            line.push_str(&format!(", {} skipped", skipped));
        }

        if self.color {
            writeln!(writer, "{}", line.dimmed())
        } else {
            writeln!(writer, "{}", line)
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_packages(
        &self,
        packages: &PackageSet,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if packages.is_empty() {
            return writeln!(writer, "No matching packages");
        }

        for name in packages.iter() {
            if self.color {
                writeln!(writer, "  {}", name.bold())?;
            } else {
                writeln!(writer, "  {}", name)?;
            }
        }

        if self.verbosity != Verbosity::Quiet {
            writeln!(writer)?;
            writeln!(writer, "{} matching packages", packages.len())?;
        }
        Ok(())
    }

    fn format_report(&self, report: &OutdatedReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let show_skipped = self.verbosity == Verbosity::Verbose;
        let width = report
            .results
            .iter()
            .filter(|r| r.is_outdated() || (show_skipped && r.is_skipped()))
            .map(|r| r.name().len())
            .max()
            .unwrap_or(0);

        if report.is_clean() {
            if self.color {
                writeln!(writer, "{}", "All packages are up to date".green())?;
            } else {
                writeln!(writer, "All packages are up to date")?;
            }
        }

        for result in report.outdated() {
            if let CheckResult::Outdated {
                name,
                current,
                latest,
            } = result
            {
                self.format_outdated_line(name, current, latest, width, writer)?;
            }
        }

        if show_skipped {
            for result in report.skipped() {
                if let CheckResult::Skipped { name, reason } = result {
                    self.format_skip_line(name, &reason.to_string(), width, writer)?;
                }
            }
        }

        if self.verbosity != Verbosity::Quiet && !report.results.is_empty() {
            writeln!(writer)?;
            self.format_summary(report, writer)?;
        }
        Ok(())
    }
}
