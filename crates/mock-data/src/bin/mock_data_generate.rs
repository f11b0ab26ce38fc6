//! Generates a mock JSON database and reports per-collection counts.
//!
//! This binary delegates to `mock_data::cli` for argument resolution and the
//! run itself, keeping the CLI behaviour testable without spawning a process.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use mock_data::cli::{CliArgs, RunReport, run};
use mockable::DefaultClock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    match run(&args, &DefaultClock) {
        Ok(report) => {
            for (collection, count) in report.summary {
                info!(collection, count, "collection generated");
            }
            write_success(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "generation failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn write_success(report: &RunReport) {
    let mut out = io::stdout().lock();
    let mut lines = vec![format!("Wrote mock DB to {} (seed {})", report.out, report.seed)];
    lines.extend(
        report
            .summary
            .iter()
            .map(|(collection, count)| format!("  {collection}: {count}")),
    );
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            drop(err);
            return;
        }
    }
}
