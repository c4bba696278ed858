//! Error types for sqlweave.

use thiserror::Error;

/// The main error type for compilation.
///
/// Every variant is a hard stop for the current compile call: no partial SQL
/// is returned and nothing is retried.
#[derive(Debug, Error)]
pub enum CompileError {
    /// An undefined value where no default is allowed, an empty value list,
    /// or a non-scalar value used as a bind target.
    #[error("Invalid parameter value: {0}")]
    InvalidParameter(String),

    /// A node that cannot be rendered in the position it was placed.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Malformed join construction (e.g. `using` combined with `on`).
    #[error("Invalid join expression: {0}")]
    InvalidJoin(String),

    /// Unrecognized dialect key.
    #[error("Unknown database dialect: '{0}'. Expected: standard, mysql, mssql, oracle, sqlite or postgre")]
    UnknownDialect(String),

    /// The selected dialect has no way to express the requested feature.
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        dialect: &'static str,
        feature: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Create an invalid parameter error.
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create an invalid expression error.
    pub fn expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Create an invalid join error.
    pub fn join(message: impl Into<String>) -> Self {
        Self::InvalidJoin(message.into())
    }

    pub fn unsupported(dialect: &'static str, feature: &'static str) -> Self {
        Self::Unsupported { dialect, feature }
    }
}

/// Result type alias for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
