//! Artifact Validator CLI
//!
//! Validates a JSON file against the schema registered for its artifact type.

use std::process::ExitCode;

use artifact_schemas::cli::{execute, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = execute(&cli, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(code)
}
