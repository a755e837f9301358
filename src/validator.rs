//! Validation against a JSON Schema
//!
//! Matching is delegated to the `jsonschema` crate. This module only picks the
//! first error the engine reports and turns it into a [`Violation`] that can be
//! printed for a human: where in the instance it happened, which keyword
//! failed, and what that keyword asked for.

use std::fmt;
use std::path::Path;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::artifact::ArtifactType;

/// Validator errors
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Error: Invalid schema '{}' - {message}", .path.display())]
    InvalidSchema {
        path: std::path::PathBuf,
        message: String,
    },
}

/// One step from the document root towards the failing node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => {
                write!(f, "'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The first mismatch the engine found
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Engine message
    pub message: String,
    /// Location of the failing node in the instance
    pub instance_path: Vec<PathSegment>,
    /// Schema keyword that failed (e.g. `required`, `minItems`)
    pub keyword: String,
    /// The keyword's value as written in the schema
    pub expected: Value,
    /// JSON pointer to the keyword inside the schema
    pub schema_path: String,
}

impl Violation {
    /// `['plan', 'phases', 0]` style rendering of the instance path
    pub fn path_display(&self) -> String {
        let segments: Vec<String> = self.instance_path.iter().map(ToString::to_string).collect();
        format!("[{}]", segments.join(", "))
    }

    /// Multi-line failure report for `file`
    pub fn report(&self, file: &Path) -> String {
        format!(
            "Validation failed for '{}'!\n\
             ---Error Details---\n\
             Message: {}\n\
             Path in JSON: {}\n\
             Validator: {} = {}",
            file.display(),
            self.message,
            self.path_display(),
            self.keyword,
            self.expected,
        )
    }
}

/// Result of checking one instance
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Conformant,
    Nonconformant(Violation),
}

impl Outcome {
    pub fn is_conformant(&self) -> bool {
        matches!(self, Outcome::Conformant)
    }
}

/// Confirmation printed when a document conforms
pub fn success_message(file: &Path, artifact: ArtifactType) -> String {
    format!(
        "Validation successful: '{}' conforms to the '{}' schema.",
        file.display(),
        artifact
    )
}

/// Validate `instance` against `schema` using Draft 7
pub fn validate(
    instance: &Value,
    schema: &Value,
    schema_file: &Path,
) -> Result<Outcome, ValidatorError> {
    validate_with_draft(instance, schema, schema_file, Draft::Draft7)
}

/// Validate `instance` against `schema`, reporting only the first error
pub fn validate_with_draft(
    instance: &Value,
    schema: &Value,
    schema_file: &Path,
    draft: Draft,
) -> Result<Outcome, ValidatorError> {
    let compiled = JSONSchema::options()
        .with_draft(draft)
        .compile(schema)
        .map_err(|e| ValidatorError::InvalidSchema {
            path: schema_file.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(schema = %schema_file.display(), "compiled schema");

    let first = match compiled.validate(instance) {
        Ok(()) => None,
        Err(mut errors) => errors.next().map(|error| {
            let instance_segments = error.instance_path.clone().into_vec();
            let schema_segments = error.schema_path.clone().into_vec();
            let (keyword, expected) = declared_keyword(schema, &schema_segments);

            Violation {
                message: error.to_string(),
                instance_path: classify_segments(instance, &instance_segments),
                schema_path: error.schema_path.to_string(),
                keyword,
                expected,
            }
        }),
    };

    match first {
        None => {
            debug!("instance conforms");
            Ok(Outcome::Conformant)
        }
        Some(violation) => {
            debug!(
                keyword = %violation.keyword,
                path = %violation.path_display(),
                "instance violates schema"
            );
            Ok(Outcome::Nonconformant(violation))
        }
    }
}

/// Tell array indices from object keys by walking the instance alongside the path
fn classify_segments(instance: &Value, segments: &[String]) -> Vec<PathSegment> {
    let mut node = Some(instance);
    segments
        .iter()
        .map(|segment| match node {
            Some(Value::Array(items)) => match segment.parse::<usize>() {
                Ok(index) => {
                    node = items.get(index);
                    PathSegment::Index(index)
                }
                Err(_) => {
                    node = None;
                    PathSegment::Key(segment.clone())
                }
            },
            Some(Value::Object(map)) => {
                node = map.get(segment);
                PathSegment::Key(segment.clone())
            }
            _ => {
                node = None;
                PathSegment::Key(segment.clone())
            }
        })
        .collect()
}

/// Keyword label used when a `false` subschema rejects a value
pub const FALSE_SCHEMA: &str = "false schema";

/// Keywords whose members are named or indexed subschemas
const SUBSCHEMA_MAPS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "dependencies",
];

/// Maximum `$ref` hops followed for a single segment
const MAX_REF_HOPS: usize = 32;

/// Keyword at the end of `segments` and its value as declared in `root`.
///
/// The engine's schema path does not record `$ref` hops, so each step that
/// misses on a node carrying a local `$ref` is retried on the referenced schema.
fn declared_keyword(root: &Value, segments: &[String]) -> (String, Value) {
    let Some((last, parents)) = segments.split_last() else {
        return (String::new(), Value::Null);
    };

    let parent = parents
        .iter()
        .try_fold(root, |node, segment| step(root, node, segment));
    let declared = parent.and_then(|node| step(root, node, last));

    let names_subschema = last.parse::<usize>().is_ok()
        || parents
            .last()
            .map_or(false, |owner| SUBSCHEMA_MAPS.contains(&owner.as_str()));
    if names_subschema && matches!(declared, Some(Value::Bool(false))) {
        return (FALSE_SCHEMA.to_string(), Value::Bool(false));
    }

    (last.clone(), declared.cloned().unwrap_or(Value::Null))
}

/// Move one segment down the schema, following local `$ref`s on a miss
fn step<'a>(root: &'a Value, mut node: &'a Value, segment: &str) -> Option<&'a Value> {
    for _ in 0..=MAX_REF_HOPS {
        let child = match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        if child.is_some() {
            return child;
        }
        let pointer = node.get("$ref")?.as_str()?.strip_prefix('#')?;
        node = root.pointer(pointer)?;
    }
    None
}
