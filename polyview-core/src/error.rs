//! Error types for mesh loading.
//!
//! Rendering itself cannot fail once a mesh has loaded, so every error in the
//! core comes from reading and validating the object description.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that abort loading an object description.
///
/// Line and field numbers are 1-based.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input ended before all declared lines were read.
    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof {
        /// Line number that was missing.
        line: usize,
        /// What the missing line should have held.
        expected: &'static str,
    },

    /// A header or vertex line has the wrong number of fields.
    #[error("line {line}: {kind} line has {found} fields, expected {expected}")]
    FieldCount {
        /// The line number.
        line: usize,
        /// `"header"` or `"vertex"`.
        kind: &'static str,
        /// Number of fields required.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// A face lists fewer than three vertices.
    #[error("line {line}: face has {found} vertices, expected at least 3")]
    FaceTooSmall {
        /// The line number.
        line: usize,
        /// Number of vertex ids present.
        found: usize,
    },

    /// A field is not a valid number of the required kind.
    #[error("line {line}, field {field}: invalid {kind} {text:?}")]
    InvalidNumber {
        /// The line number.
        line: usize,
        /// The field number within the line.
        field: usize,
        /// `"count"`, `"integer"` or `"coordinate"`.
        kind: &'static str,
        /// The offending field text.
        text: String,
    },

    /// Two vertex lines share the same id.
    #[error("line {line}: duplicate vertex id {id}")]
    DuplicateVertex {
        /// The line number of the second definition.
        line: usize,
        /// The repeated id.
        id: i64,
    },

    /// A face references a vertex id that was never defined.
    #[error("line {line}: face references unknown vertex id {id}")]
    UnknownVertex {
        /// The line number of the face.
        line: usize,
        /// The unresolved id.
        id: i64,
    },
}
