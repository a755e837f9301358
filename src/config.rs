//! Configuration for the validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (validate-schema.toml)
//! - Environment variables (ARTIFACT_SCHEMAS_*, e.g. ARTIFACT_SCHEMAS_SCHEMAS__DIR)
//!
//! ## Example config file (validate-schema.toml):
//! ```toml
//! [schemas]
//! dir = "./prompts/schemas"
//!
//! [validation]
//! draft = "draft7"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and the XDG config dir
pub const CONFIG_FILE: &str = "validate-schema.toml";

/// Directory holding the schema files, relative to the executable
pub const SCHEMA_DIR_NAME: &str = "schemas";

/// Configuration errors
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ConfigError(#[from] config_crate::ConfigError);

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Schema location settings
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Schema location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Directory containing the `*.schema.json` files
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Validation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// JSON Schema draft used to compile schemas
    #[serde(default)]
    pub draft: SchemaDraft,
}

/// Supported JSON Schema drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDraft {
    Draft4,
    Draft6,
    #[default]
    Draft7,
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(draft: SchemaDraft) -> Self {
        match draft {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding `config_path` as a required source
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "validate-schema.toml",
            ".validate-schema.toml",
            "config/validate-schema.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        let project_dirs =
            directories::ProjectDirs::from("dev", "artifact-schemas", "validate-schema");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join(CONFIG_FILE);
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ARTIFACT_SCHEMAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Pick the schema directory: explicit override, then config, then the
    /// `schemas/` directory beside the executable, then the bundled one.
    pub fn schema_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir.or(self.schemas.dir.as_deref()) {
            return dir.to_path_buf();
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(SCHEMA_DIR_NAME)));

        match beside_exe {
            Some(dir) if dir.is_dir() => dir,
            _ => bundled_schema_dir(),
        }
    }
}

/// Schema directory shipped with the crate sources
pub fn bundled_schema_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SCHEMA_DIR_NAME)
}
