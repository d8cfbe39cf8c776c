//! DSL error types

use thiserror::Error;

/// Result type for DSL parsing and compilation
pub type DslResult<T> = std::result::Result<T, DslError>;

/// Errors that can occur while parsing DSL source or compiling a formula
#[derive(Debug, Error)]
pub enum DslError {
    /// Malformed expression or definition line
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A compile request or call site names a formula absent from the table
    #[error("Unknown formula: {0}")]
    UnknownFormula(String),

    /// Supplied argument count differs from the declared parameter count
    #[error("Wrong number of arguments for {formula}: expected {expected}, got {actual}")]
    ArityMismatch {
        formula: String,
        expected: usize,
        actual: usize,
    },

    /// Formula expansion exceeded the depth limit, which in practice means a
    /// formula calls itself directly or mutually
    #[error("Cyclic formula definition involving '{0}'")]
    CyclicDefinition(String),
}
