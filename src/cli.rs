//! CLI argument parsing module for stalecheck

use crate::domain::{ManifestRef, PackageSet};
use crate::output::{OutputFormat, DEFAULT_DELIMITER};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parse duration string in format: N (seconds), Ns (seconds), Nms (milliseconds)
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let (num_str, millis) = if let Some(n) = s.strip_suffix("ms") {
        (n, true)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, false)
    } else {
        (s, false)
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in duration: {}", num_str))?;

    if num == 0 {
        return Err("duration must be greater than zero".to_string());
    }

    Ok(if millis {
        Duration::from_millis(num)
    } else {
        Duration::from_secs(num)
    })
}

/// Finds upstream crates a downstream project depends on and reports which are stale
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stalecheck",
    version,
    about = "Report stale upstream crates in a downstream project"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    // Output options
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::List, global = true)]
    pub format: OutputFormat,

    /// Delimiter between names in list output
    #[arg(long, default_value = DEFAULT_DELIMITER, global = true)]
    pub delimiter: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    // Registry options
    /// Base URL of a crates.io-compatible registry API
    #[arg(long, env = "STALECHECK_REGISTRY_URL", global = true)]
    pub registry_url: Option<String>,

    /// Maximum number of registry lookups in flight
    #[arg(
        long,
        env = "STALECHECK_CONCURRENCY",
        default_value_t = 4,
        value_parser = clap::value_parser!(u16).range(1..),
        global = true
    )]
    pub concurrency: u16,

    /// Per-lookup timeout (e.g., 10, 10s, 500ms)
    #[arg(
        long,
        env = "STALECHECK_TIMEOUT",
        default_value = "10",
        value_parser = parse_duration,
        global = true
    )]
    pub timeout: Duration,

    /// Minimum interval between registry requests in milliseconds
    #[arg(long, global = true)]
    pub rate_limit_ms: Option<u64>,

    /// Exit with code 3 when any package is outdated
    #[arg(long, global = true)]
    pub fail_on_outdated: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List upstream packages the downstream project depends on directly
    #[command(name = "get-libs", alias = "libs")]
    GetLibs {
        /// Upstream manifest (Cargo.toml or its directory)
        upstream: String,
        /// Downstream manifest (Cargo.toml or its directory)
        downstream: String,
    },

    /// Report which of the named packages are stale in the downstream project
    #[command(name = "get-outdated-libs", alias = "outdated")]
    GetOutdatedLibs {
        /// Package names separated by whitespace, commas or semicolons
        names: String,
        /// Downstream manifest (Cargo.toml or its directory)
        downstream: String,
    },

    /// Extract upstream dependencies and check them in one step
    Check {
        /// Upstream manifest (Cargo.toml or its directory)
        upstream: String,
        /// Downstream manifest (Cargo.toml or its directory)
        downstream: String,
    },
}

impl Command {
    /// Downstream manifest shared by every subcommand
    pub fn downstream(&self) -> ManifestRef {
        match self {
            Command::GetLibs { downstream, .. }
            | Command::GetOutdatedLibs { downstream, .. }
            | Command::Check { downstream, .. } => ManifestRef::new(downstream.clone()),
        }
    }

    /// Upstream manifest, if the subcommand takes one
    pub fn upstream(&self) -> Option<ManifestRef> {
        match self {
            Command::GetLibs { upstream, .. } | Command::Check { upstream, .. } => {
                Some(ManifestRef::new(upstream.clone()))
            }
            Command::GetOutdatedLibs { .. } => None,
        }
    }

    /// Package names given on the command line, if any
    pub fn names(&self) -> Option<PackageSet> {
        match self {
            Command::GetOutdatedLibs { names, .. } => Some(PackageSet::parse(names)),
            _ => None,
        }
    }
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Requested registry pacing, if any
    pub fn rate_limit(&self) -> Option<Duration> {
        self.rate_limit_ms.map(Duration::from_millis)
    }

    /// Whether to draw progress on stderr
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["stalecheck"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("10").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("5m").is_err());
    }

    #[test]
    fn test_default_args() {
        let args = parse(&["get-libs", "up", "down"]);
        assert_eq!(args.format, OutputFormat::List);
        assert_eq!(args.delimiter, " ");
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert_eq!(args.concurrency, 4);
        assert_eq!(args.timeout, Duration::from_secs(10));
        assert!(args.rate_limit().is_none());
        assert!(!args.fail_on_outdated);
    }

    #[test]
    fn test_get_libs_command() {
        let args = parse(&["get-libs", "../zcash", "."]);
        assert_eq!(
            args.command,
            Command::GetLibs {
                upstream: "../zcash".to_string(),
                downstream: ".".to_string(),
            }
        );
        assert!(args.command.names().is_none());
    }

    #[test]
    fn test_aliases() {
        let args = parse(&["libs", "a", "b"]);
        assert!(matches!(args.command, Command::GetLibs { .. }));

        let args = parse(&["outdated", "x y", "b"]);
        assert!(matches!(args.command, Command::GetOutdatedLibs { .. }));
    }

    #[test]
    fn test_get_outdated_libs_names() {
        let args = parse(&["get-outdated-libs", "zcash_proofs,orchard", "."]);
        let names = args.command.names().unwrap();
        assert_eq!(names.join(" "), "orchard zcash_proofs");
        assert!(args.command.upstream().is_none());
    }

    #[test]
    fn test_empty_names_allowed() {
        let args = parse(&["get-outdated-libs", "", "."]);
        assert!(args.command.names().unwrap().is_empty());
    }

    #[test]
    fn test_empty_locator_reaches_validation() {
        let args = parse(&["get-libs", "", "down"]);
        assert!(args.command.upstream().unwrap().is_empty());
    }

    #[test]
    fn test_check_command() {
        let args = parse(&["check", "up", "down"]);
        assert_eq!(args.command.upstream().unwrap(), ManifestRef::from("up"));
        assert_eq!(args.command.downstream(), ManifestRef::from("down"));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = parse(&[
            "check",
            "up",
            "down",
            "--format",
            "json",
            "--concurrency",
            "8",
            "--timeout",
            "2s",
            "--rate-limit-ms",
            "250",
            "--fail-on-outdated",
        ]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.concurrency, 8);
        assert_eq!(args.timeout, Duration::from_secs(2));
        assert_eq!(args.rate_limit(), Some(Duration::from_millis(250)));
        assert!(args.fail_on_outdated);
    }

    #[test]
    fn test_table_format_and_delimiter() {
        let args = parse(&["--format", "table", "--delimiter", ",", "libs", "a", "b"]);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.delimiter, ",");
    }

    #[test]
    fn test_quiet_hides_progress() {
        let args = parse(&["-q", "libs", "a", "b"]);
        assert!(args.quiet);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_concurrency_zero_rejected() {
        let result = CliArgs::try_parse_from(["stalecheck", "--concurrency", "0", "libs", "a", "b"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(CliArgs::try_parse_from(["stalecheck"]).is_err());
    }

    #[test]
    fn test_missing_downstream_rejected() {
        let result = CliArgs::try_parse_from(["stalecheck", "get-libs", "up"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
    }
}
