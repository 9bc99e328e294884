//! The state-reading interface and its local-file implementation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::StateError;
use crate::value::Outputs;

/// Newest state document format version this reader understands.
pub const MAX_STATE_VERSION: u64 = 4;

/// Source of root-module output values.
///
/// Implementations own everything about reaching the state: locating it,
/// locking, retries. Callers make exactly one call per command run.
pub trait StateReader {
    /// Returns the output values, reading from `path_override` when given.
    ///
    /// `Ok(None)` means there is no state yet, which callers treat the same as
    /// a state with no outputs.
    fn outputs(&self, path_override: Option<&Path>) -> Result<Option<Outputs>, StateError>;
}

#[derive(Deserialize)]
struct StateDocument {
    version: u64,
    #[serde(default)]
    outputs: Outputs,
}

/// Reads outputs from a JSON state document on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStateReader {
    default_path: PathBuf,
}

impl LocalStateReader {
    /// Creates a reader that falls back to `default_path` when no override is
    /// given.
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Self {
            default_path: default_path.into(),
        }
    }

    /// The path used when no override is given.
    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    fn read(path: &Path) -> Result<Outputs, StateError> {
        let content = std::fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: StateDocument =
            serde_json::from_str(&content).map_err(|e| StateError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if doc.version > MAX_STATE_VERSION {
            return Err(StateError::UnsupportedVersion {
                path: path.to_path_buf(),
                version: doc.version,
                supported: MAX_STATE_VERSION,
            });
        }
        debug!(
            path = %path.display(),
            version = doc.version,
            outputs = doc.outputs.len(),
            "loaded state"
        );
        Ok(doc.outputs)
    }
}

impl StateReader for LocalStateReader {
    fn outputs(&self, path_override: Option<&Path>) -> Result<Option<Outputs>, StateError> {
        match path_override {
            Some(path) => {
                if !path.exists() {
                    return Err(StateError::NotFound(path.to_path_buf()));
                }
                Self::read(path).map(Some)
            }
            None => {
                if !self.default_path.exists() {
                    debug!(path = %self.default_path.display(), "no state file, treating as empty");
                    return Ok(None);
                }
                Self::read(&self.default_path).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const STATE: &str = r#"{
  "version": 4,
  "serial": 3,
  "lineage": "2f1c7f0e",
  "outputs": {
    "greeting": {"value": "hi", "type": "string"},
    "ports": {"value": [80, 443], "type": ["list", "number"]},
    "token": {"value": "s3cr3t", "type": "string", "sensitive": true}
  },
  "resources": []
}"#;

    fn write_state(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_default_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_state(&tmp, "terrain.tfstate", STATE);
        let reader = LocalStateReader::new(&path);
        let outputs = reader.outputs(None).unwrap().unwrap();
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs["greeting"].value, json!("hi"));
        assert_eq!(
            outputs["ports"].value_type,
            ValueType::List(Box::new(ValueType::Number))
        );
        assert!(outputs["token"].sensitive);
    }

    #[test]
    fn override_wins_over_default() {
        let tmp = TempDir::new().unwrap();
        let default = write_state(&tmp, "terrain.tfstate", r#"{"version": 4, "outputs": {}}"#);
        let other = write_state(&tmp, "other.tfstate", STATE);
        let reader = LocalStateReader::new(default);
        let outputs = reader.outputs(Some(&other)).unwrap().unwrap();
        assert!(outputs.contains_key("greeting"));
    }

    #[test]
    fn missing_default_is_no_state() {
        let tmp = TempDir::new().unwrap();
        let reader = LocalStateReader::new(tmp.path().join("terrain.tfstate"));
        assert!(reader.outputs(None).unwrap().is_none());
    }

    #[test]
    fn missing_override_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let reader = LocalStateReader::new(tmp.path().join("terrain.tfstate"));
        let missing = tmp.path().join("nope.tfstate");
        let err = reader.outputs(Some(&missing)).unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));
    }

    #[test]
    fn state_without_outputs_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = write_state(&tmp, "terrain.tfstate", r#"{"version": 4}"#);
        let outputs = LocalStateReader::new(path).outputs(None).unwrap().unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn malformed_state_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_state(&tmp, "terrain.tfstate", "{not json");
        let err = LocalStateReader::new(path).outputs(None).unwrap_err();
        assert!(matches!(err, StateError::Parse { .. }));
    }

    #[test]
    fn bad_type_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_state(
            &tmp,
            "terrain.tfstate",
            r#"{"version": 4, "outputs": {"x": {"value": 1, "type": "float"}}}"#,
        );
        let err = LocalStateReader::new(path).outputs(None).unwrap_err();
        assert!(err.to_string().contains("invalid type constraint"));
    }

    #[test]
    fn newer_version_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_state(&tmp, "terrain.tfstate", r#"{"version": 5, "outputs": {}}"#);
        let err = LocalStateReader::new(path).outputs(None).unwrap_err();
        assert!(matches!(
            err,
            StateError::UnsupportedVersion { version: 5, .. }
        ));
    }

    #[test]
    fn directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let reader = LocalStateReader::new(tmp.path());
        let err = reader.outputs(None).unwrap_err();
        assert!(matches!(err, StateError::Io { .. }));
    }
}
