//! Command dispatch
//!
//! Runs one validation from parsed arguments through to an exit status:
//! resolve the schema, load the schema and the instance, validate, report.
//! Any stage that fails ends the run with that stage's exit status.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::artifact::{resolve_schema, ArtifactType};
use crate::config::ValidatorConfig;
use crate::error::{Result, ValidateError, EXIT_FAILURE, EXIT_OK};
use crate::loader::load_json;
use crate::validator::{success_message, validate_with_draft, Outcome};

#[derive(Parser, Debug)]
#[command(name = "validate-schema")]
#[command(version)]
#[command(about = "Validate a JSON file against a predefined artifact schema")]
#[command(after_help = supported_types_help())]
pub struct Cli {
    /// The type of artifact to validate
    pub artifact_type: String,

    /// The path to the JSON file to validate
    pub file_path: PathBuf,

    /// Directory containing the schema files
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}

/// `['plan', ...]` list of the artifact types that have a schema
fn supported_list() -> String {
    let supported: Vec<String> = ArtifactType::supported()
        .iter()
        .map(|id| format!("'{}'", id))
        .collect();
    format!("[{}]", supported.join(", "))
}

fn supported_types_help() -> String {
    format!("Artifact types with a schema: {}", supported_list())
}

/// Usage guidance printed after an artifact type error
pub fn usage_guidance() -> String {
    format!(
        "Usage: validate-schema <ARTIFACT_TYPE> <FILE_PATH>\n  \
         <ARTIFACT_TYPE>: one of {}\n  \
         <FILE_PATH>: path to the JSON file to validate",
        supported_list()
    )
}

/// Run the resolve, load and validate stages
pub fn check(cli: &Cli, config: &ValidatorConfig) -> Result<(ArtifactType, Outcome)> {
    let schema_dir = config.schema_dir(cli.schema_dir.as_deref());
    let (artifact, schema_path) = resolve_schema(&cli.artifact_type, &schema_dir)?;
    debug!(artifact = %artifact, schema = %schema_path.display(), "resolved schema");

    let schema = load_json(&schema_path)?;
    let instance = load_json(&cli.file_path)?;

    let draft = config.validation.draft.into();
    let outcome = validate_with_draft(&instance, &schema, &schema_path, draft)?;
    Ok((artifact, outcome))
}

/// Execute one invocation, writing the verdict to `out`/`err`, and return the exit status
pub fn execute(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    let verdict = ValidatorConfig::load()
        .map_err(ValidateError::from)
        .and_then(|config| check(cli, &config));

    // Nothing useful can be done if stdout/stderr are gone.
    match verdict {
        Ok((artifact, Outcome::Conformant)) => {
            let _ = writeln!(out, "{}", success_message(&cli.file_path, artifact));
            EXIT_OK
        }
        Ok((_, Outcome::Nonconformant(violation))) => {
            let _ = writeln!(err, "{}", violation.report(&cli.file_path));
            EXIT_FAILURE
        }
        Err(e) => {
            report_error(&e, err);
            e.exit_code()
        }
    }
}

fn report_error(e: &ValidateError, err: &mut impl Write) {
    let _ = writeln!(err, "{}", e);
    if e.wants_usage() {
        let _ = writeln!(err, "{}", usage_guidance());
    }
}
