//! Error types for loading, validating, and recording a simulation.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MlfqError>;

/// Errors surfaced by the library.
///
/// The simulation itself cannot fail: every variant comes from an I/O
/// adapter or from load-time checks.
#[derive(Debug, Error)]
pub enum MlfqError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read job list: {0}")]
    Read(#[source] std::io::Error),

    #[error("line {line}: field `{field}` expects a non-negative integer, got `{value}`")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: job list is not valid UTF-8")]
    Encoding { line: usize },

    #[error("line {line}: incomplete job record ({found} of 4 fields)")]
    TruncatedRecord { line: usize, found: usize },

    #[error("invalid input: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write trace: {0}")]
    Sink(#[from] std::io::Error),
}

impl MlfqError {
    /// Whether the error stems from the job input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::Encoding { .. }
                | Self::TruncatedRecord { .. }
                | Self::Invalid(_)
        )
    }
}

pub(crate) fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
