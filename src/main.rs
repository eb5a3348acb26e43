//! stalecheck - upstream dependency staleness checker CLI tool
//!
//! Lists the upstream crates a downstream project uses and reports the ones
//! whose resolved version differs from the latest stable release.

use stalecheck::cli::CliArgs;
use stalecheck::orchestrator::Orchestrator;
use stalecheck::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse_args();
    init_logging(args.verbose, args.quiet);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize stderr logging; `RUST_LOG` overrides the CLI verbosity
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), command = ?args.command, "Starting");

    let output_config =
        OutputConfig::from_cli(args.format, &args.delimiter, args.verbose, args.quiet);
    let fail_on_outdated = args.fail_on_outdated;

    let orchestrator = Orchestrator::new(args)?;
    let outcome = orchestrator.run().await?;

    // Output results only after the whole run succeeded
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    outcome.write(formatter.as_ref(), &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(outcome.exit_status(fail_on_outdated)))
}
