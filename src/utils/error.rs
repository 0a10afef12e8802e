//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and validating a trace document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during call tree reconstruction
#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("Empty trace: no call record produced a root ({skipped} records skipped)")]
    EmptyTrace { skipped: usize },
}

/// Structural problems found while rebuilding the call tree.
///
/// These never abort reconstruction: the offending record is skipped
/// and the tree built so far is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceAnomaly {
    #[error("record {index}: return '{name}' with no open call")]
    StackUnderflow { index: usize, name: String },

    #[error("record {index}: call '{name}' outside the root call")]
    ExtraTopLevelCall { index: usize, name: String },

    #[error("record {index}: return '{found}' does not match open call '{expected}'")]
    ReturnMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("record {index}: ignoring event of kind '{kind}'")]
    UnrecognizedKind { index: usize, kind: String },
}

impl TraceAnomaly {
    /// Index of the record that triggered the anomaly
    pub fn index(&self) -> usize {
        match self {
            Self::StackUnderflow { index, .. }
            | Self::ExtraTopLevelCall { index, .. }
            | Self::ReturnMismatch { index, .. }
            | Self::UnrecognizedKind { index, .. } => *index,
        }
    }

    /// Unrecognized kinds are informational; everything else is structural
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::UnrecognizedKind { .. })
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
