//! JSON document loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Document loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Error: File not found - {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error: Cannot read file '{}' - {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error: Invalid JSON in file '{}' - {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Path of the file that failed to load
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Unreadable { path, .. }
            | LoadError::MalformedJson { path, .. } => path,
        }
    }
}

/// Read and parse a JSON file
pub fn load_json(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(LoadError::NotFound { path: path.to_path_buf() });
    }

    let content = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
        _ => LoadError::Unreadable { path: path.to_path_buf(), source },
    })?;

    let value = parse_json(path, &content)?;
    debug!(path = %path.display(), bytes = content.len(), "loaded JSON document");
    Ok(value)
}

/// Parse JSON bytes, attributing any syntax or encoding error to `path`
pub fn parse_json(path: &Path, content: &[u8]) -> Result<Value, LoadError> {
    serde_json::from_slice(content).map_err(|source| LoadError::MalformedJson {
        path: path.to_path_buf(),
        line: source.line(),
        column: source.column(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_temp(content: impl AsRef<[u8]>) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_ref()).unwrap();
        file
    }

    #[test]
    fn test_load_matches_reference_parse() {
        let text = r#"{"plan": {"title": "Ship it", "phases": [1, 2.5, null, true, "x"]}}"#;
        let file = write_temp(text);
        let loaded = load_json(file.path()).unwrap();
        let reference: Value = serde_json::from_str(text).unwrap();
        assert_eq!(loaded, reference);
    }

    #[test]
    fn test_load_scalar_document() {
        let file = write_temp("42");
        assert_eq!(load_json(file.path()).unwrap(), json!(42));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        match load_json(&path) {
            Err(LoadError::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_json(dir.path()), Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let file = write_temp("{\"a\": }");
        let err = load_json(file.path()).unwrap_err();
        match &err {
            LoadError::MalformedJson { line, column, .. } => {
                assert_eq!(*line, 1);
                assert!(*column > 0);
            }
            other => panic!("Expected MalformedJson, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("Invalid JSON"));
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let file = write_temp("");
        assert!(matches!(load_json(file.path()), Err(LoadError::MalformedJson { .. })));
    }

    #[test]
    fn test_error_reports_path() {
        let err = parse_json(Path::new("plan.json"), b"[1,").unwrap_err();
        assert_eq!(err.path(), Path::new("plan.json"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let file = write_temp(b"{\"a\": \"\xff\"}");
        match load_json(file.path()) {
            Err(LoadError::MalformedJson { line, column, .. }) => {
                assert_eq!(line, 1);
                assert!(column > 0);
            }
            other => panic!("Expected MalformedJson, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_denied_is_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let file = write_temp("{}");
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still read the file.
        if std::fs::read(file.path()).is_ok() {
            return;
        }

        let err = load_json(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }), "got {:?}", err);
        assert!(err.to_string().starts_with("Error: Cannot read file"));
    }
}
