//! Kiln - environment-aware credential resolver and dbt runner.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kiln::cli::output;
use kiln::cli::{execute, Cli};
use kiln::error::{EngineError, Error, SecretError};

/// Exit code for pre-flight failures, distinct from engine exit codes.
const PREFLIGHT_EXIT: i32 = 2;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("KILN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("kiln=debug")
        } else {
            EnvFilter::new("kiln=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command, cli.environment) {
        let suggestion = match &e {
            Error::Credentials(_) => {
                Some("check the secret bundle, or export the SNOWFLAKE_* variables for dev")
            }
            Error::Secret(SecretError::NotFound(_)) => {
                Some("verify the environment; secrets are named {project}/{env}/{service}/credentials")
            }
            Error::Engine(EngineError::NotFound(_)) => {
                Some("install dbt, or set [engine].bin in .kiln.toml")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(PREFLIGHT_EXIT);
    }
}
