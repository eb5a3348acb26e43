//! Output formatting for extraction and check results
//!
//! This module provides:
//! - Delimited list output for driving scripts
//! - JSON output for machine processing
//! - Table output for human-readable display

mod json;
mod list;
mod table;

pub use json::JsonFormatter;
pub use list::ListFormatter;
pub use table::TableFormatter;

use crate::domain::{OutdatedReport, PackageSet};
use clap::ValueEnum;
use std::io::Write;

/// Default delimiter between names in list output
pub const DEFAULT_DELIMITER: &str = " ";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Names joined by a delimiter on one line
    #[default]
    List,
    /// JSON output for machine processing
    Json,
    /// Human-readable colored table
    Table,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (list, json, table)
    pub format: OutputFormat,
    /// Delimiter used by list output
    pub delimiter: String,
    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            verbosity: Verbosity::default(),
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(format: OutputFormat, delimiter: &str, verbose: bool, quiet: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            delimiter: delimiter.to_string(),
            verbosity,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the packages matched by the extractor
    fn format_packages(&self, packages: &PackageSet, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format and write the staleness report
    fn format_report(&self, report: &OutdatedReport, writer: &mut dyn Write)
        -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::List => Box::new(ListFormatter::new(config.delimiter)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Table => Box::new(TableFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::List);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::List);
        assert_eq!(config.delimiter, " ");
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli() {
        let config = OutputConfig::from_cli(OutputFormat::Json, ",", true, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.verbosity, Verbosity::Verbose);

        let config = OutputConfig::from_cli(OutputFormat::Table, " ", true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_create_formatter_list() {
        let formatter = create_formatter(OutputConfig::default());
        let mut out = Vec::new();
        formatter
            .format_packages(&PackageSet::parse("b a"), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a b\n");
    }
}
