//! Unified error handling for carechain
//!
//! Every fallible operation in the crate reports a [`ChainError`]. Routing
//! itself never fails; errors only come from wiring a chain, loading
//! configuration, or appending diagnostics.

use std::fmt;

/// Unified error types for the care chain
#[derive(Debug)]
pub enum ChainError {
    /// Malformed chain or handler configuration, detected before routing starts
    Configuration(String),

    /// Diagnostics log could not be written
    Diagnostics(std::io::Error),

    /// Configuration file failed validation
    Validation(String),

    /// Configuration file could not be parsed
    Parse(String),

    /// Other I/O errors
    Io(std::io::Error),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            ChainError::Diagnostics(err) => write!(f, "Diagnostics error: {err}"),
            ChainError::Validation(msg) => write!(f, "Validation error: {msg}"),
            ChainError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ChainError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChainError::Diagnostics(err) | ChainError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::Io(err)
    }
}

impl From<validator::ValidationErrors> for ChainError {
    fn from(err: validator::ValidationErrors) -> Self {
        ChainError::Validation(err.to_string())
    }
}

/// Result type alias for chain operations
pub type ChainResult<T> = std::result::Result<T, ChainError>;

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    fn with_context(self, context: &str) -> ChainResult<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: fmt::Display,
{
    fn with_context(self, context: &str) -> ChainResult<T> {
        self.map_err(|e| ChainError::Configuration(format!("{context}: {e}")))
    }
}

/// Convenience macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::ChainError::Configuration($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::ChainError::Configuration(format!($fmt, $($arg)*))
    };
}
