//! Crate-level error type.

use thiserror::Error;

use crate::io::ParseError;
use crate::validation::ValidationError;

/// Errors surfaced to callers. All of them occur before the search starts.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance failed structural validation.
    #[error("input rejected: {}", join_messages(.0))]
    Rejected(Vec<ValidationError>),
    /// The instance text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The instance could not be read.
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Rejected(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
