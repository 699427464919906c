//! sdd-system - Spec-driven development CLI
//!
//! Tech pack resolution, validation, and routing for the SDD plugin.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sdd_system::SddError;
use sdd_system::app::AppContext;
use sdd_system::cli::Cli;
use sdd_system::cli::output::outcome_err;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON envelope to stdout, even on failure.
                let envelope = outcome_err(&e, failure_data(&e));
                println!("{}", serde_json::to_string(&envelope).unwrap_or_default());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SddError> {
    let ctx = AppContext::from_cli(cli)?;
    sdd_system::cli::commands::run(&ctx, &cli.command)
}

/// Validation failures carry their full issue list as structured data so
/// callers don't have to re-parse the message.
fn failure_data(error: &SddError) -> Option<serde_json::Value> {
    match error {
        SddError::ValidationFailed {
            name,
            namespace,
            issues,
        } => Some(serde_json::json!({
            "name": name,
            "namespace": namespace,
            "errors": issues
                .iter()
                .map(|issue| serde_json::json!({
                    "code": issue.code(),
                    "message": issue.to_string(),
                }))
                .collect::<Vec<_>>(),
        })),
        _ => None,
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,sdd_system=info",
        1 => "info,sdd_system=debug",
        2 => "debug,sdd_system=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
