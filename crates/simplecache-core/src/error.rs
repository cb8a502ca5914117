//! Error types for backend client operations

use thiserror::Error;

/// Error type reported by backend clients
///
/// These errors never cross the [`Cache`](crate::Cache) boundary: the
/// adapter collapses them into `false` or the caller-supplied default.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Backend connection failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Backend operation failed
    #[error("backend error: {0}")]
    Backend(String),

    /// Operation timed out
    #[error("operation timed out")]
    Timeout,
}

/// Result type alias for backend client operations
pub type Result<T> = std::result::Result<T, CacheError>;
