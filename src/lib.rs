//! Artifact Schemas
//!
//! Checks project artifacts (implementation plans and friends) against the
//! JSON Schemas bundled with this crate, and reports the first place a
//! document falls short.
//!
//! ## Layout
//!
//! ```text
//! schemas/
//! └── implementation_plan.schema.json   <- plan
//! ```
//!
//! ## Flow
//!
//! `artifact type` → [`artifact::resolve_schema`] → [`loader::load_json`]
//! (schema, then instance) → [`validator::validate`] → exit status.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod validator;

pub use artifact::{resolve_schema, ArtifactType, RegistryError};
pub use config::{SchemaDraft, ValidatorConfig};
pub use error::{Result, ValidateError, EXIT_FAILURE, EXIT_OK, EXIT_USAGE};
pub use loader::{load_json, LoadError};
pub use validator::{validate, Outcome, PathSegment, ValidatorError, Violation};
