//! Error types for state reading and value conversion.

use std::path::PathBuf;

/// Errors that can occur while reading outputs from state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// An explicitly requested state file does not exist.
    #[error("state file {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The state file exists but could not be read.
    #[error("failed to read state file {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The state file is not a valid state document.
    #[error("failed to parse state file {}: {message}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The parser's description of the problem.
        message: String,
    },

    /// The state document was written by a newer format version.
    #[error("state file {} uses format version {version}, newer than the supported version {supported}", path.display())]
    UnsupportedVersion {
        /// The file being parsed.
        path: PathBuf,
        /// The version recorded in the file.
        version: u64,
        /// The newest version this reader understands.
        supported: u64,
    },
}

/// A type constraint in a state document that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type constraint: {0}")]
pub struct TypeParseError(pub String);

/// Why a value has no raw string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawValueError {
    /// The value is null.
    #[error("value is null")]
    Null,
    /// The value is a collection or structure.
    #[error("value is {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = StateError::NotFound(PathBuf::from("prod.tfstate"));
        assert_eq!(format!("{err}"), "state file prod.tfstate does not exist");
    }

    #[test]
    fn display_unsupported_version() {
        let err = StateError::UnsupportedVersion {
            path: PathBuf::from("a.tfstate"),
            version: 9,
            supported: 4,
        };
        assert_eq!(
            format!("{err}"),
            "state file a.tfstate uses format version 9, newer than the supported version 4"
        );
    }

    #[test]
    fn display_raw_errors() {
        assert_eq!(format!("{}", RawValueError::Null), "value is null");
        assert_eq!(
            format!("{}", RawValueError::Unsupported("list of string".into())),
            "value is list of string"
        );
    }
}
