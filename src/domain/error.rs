//! Error types for the Tierdex plugin.
//!
//! [`TierdexError`] is the single error type shared by the repository, worker,
//! form and configuration code. [`Result`] is the matching alias used across
//! the crate.

use thiserror::Error;

/// The main error type for Tierdex operations.
///
/// Repository failures (local file or remote HTTP) never interrupt the UI
/// event loop: they are converted into failure outcomes and rendered as
/// alerts, leaving previously loaded data in place.
///
/// # Examples
///
/// ```
/// use tierdex::TierdexError;
///
/// let err = TierdexError::Remote { status: 503, message: "unavailable".into() };
/// assert_eq!(err.to_string(), "Remote error (HTTP 503): unavailable");
/// ```
#[derive(Debug, Error)]
pub enum TierdexError {
    /// Local catalog or preference file could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be loaded or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote backend answered with a non-success status.
    #[error("Remote error (HTTP {status}): {message}")]
    Remote {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Backend-provided message, or the raw body when none could be parsed.
        message: String,
    },

    /// A backend payload did not match the expected record shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input was rejected before any repository call.
    #[error("Validation error: {0}")]
    Validation(#[from] crate::domain::form::ValidationError),
}

impl From<serde_json::Error> for TierdexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for Tierdex operations.
pub type Result<T> = std::result::Result<T, TierdexError>;
