//! fods error types

use thiserror::Error;

/// Result type for fods operations
pub type FodsResult<T> = std::result::Result<T, FodsError>;

/// Errors that can occur while assembling or writing a document
#[derive(Debug, Error)]
pub enum FodsError {
    /// I/O error writing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell kind tag that is not one of the supported value types
    #[error("Unknown cell kind: {0}")]
    UnknownCellKind(String),
}
