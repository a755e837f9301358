//! Artifact registry
//!
//! Maps artifact type identifiers to the schema files that describe them.
//! The table is fixed at compile time; a type may be declared before its
//! schema exists, in which case it resolves to [`RegistryError::NotYetDefined`].

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Artifact registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Error: Unknown artifact type '{0}'.")]
    Unknown(String),

    #[error("Error: Schema for artifact type '{0}' is not defined yet.")]
    NotYetDefined(String),
}

/// A registered category of artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    /// Implementation plan produced by the planning phase
    Plan,
    /// Memory log entries
    Log,
    /// Task assignment prompts
    Task,
}

/// (identifier, artifact, schema file). `None` marks a declared type without a schema.
const REGISTRY: &[(&str, ArtifactType, Option<&str>)] = &[
    ("plan", ArtifactType::Plan, Some("implementation_plan.schema.json")),
    ("log", ArtifactType::Log, None),
    ("task", ArtifactType::Task, None),
];

impl ArtifactType {
    /// Look up an artifact type by its identifier
    pub fn resolve(name: &str) -> Result<Self, RegistryError> {
        REGISTRY
            .iter()
            .find(|(id, _, _)| *id == name)
            .map(|(_, artifact, _)| *artifact)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))
    }

    /// Identifier used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Plan => "plan",
            ArtifactType::Log => "log",
            ArtifactType::Task => "task",
        }
    }

    /// Schema file name, if a schema has been wired for this type
    pub fn schema_file(&self) -> Option<&'static str> {
        REGISTRY
            .iter()
            .find(|(_, artifact, _)| artifact == self)
            .and_then(|(_, _, file)| *file)
    }

    /// Full path to this type's schema inside `schema_dir`
    pub fn schema_path(&self, schema_dir: &Path) -> Result<PathBuf, RegistryError> {
        self.schema_file()
            .map(|file| schema_dir.join(file))
            .ok_or_else(|| RegistryError::NotYetDefined(self.as_str().to_string()))
    }

    /// Identifiers that can actually be validated
    pub fn supported() -> Vec<&'static str> {
        REGISTRY
            .iter()
            .filter(|(_, _, file)| file.is_some())
            .map(|(id, _, _)| *id)
            .collect()
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve an identifier straight to its schema path
pub fn resolve_schema(
    name: &str,
    schema_dir: &Path,
) -> Result<(ArtifactType, PathBuf), RegistryError> {
    let artifact = ArtifactType::resolve(name)?;
    let path = artifact.schema_path(schema_dir)?;
    Ok((artifact, path))
}
