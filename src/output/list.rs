//! Delimited list output for driving scripts
//!
//! Prints one line: names joined by the delimiter. An empty result prints an
//! empty line, which callers read as "nothing to report".

use crate::domain::{OutdatedReport, PackageSet};
use crate::output::OutputFormatter;
use std::io::Write;

/// List formatter for shell pipelines
pub struct ListFormatter {
    delimiter: String,
}

impl ListFormatter {
    /// Create a new list formatter
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl OutputFormatter for ListFormatter {
    fn format_packages(
        &self,
        packages: &PackageSet,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", packages.join(&self.delimiter))
    }

    fn format_report(&self, report: &OutdatedReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", report.names().join(self.delimiter.as_str()))
    }
}
