//! Error types for plankr.
//!
//! All fallible operations in the crate return [`PlankrError`]. Variants
//! map to the places things can go wrong: user input validation, the
//! hosted platform, the local database, configuration, and I/O.

use thiserror::Error;

/// The error type used throughout plankr.
#[derive(Debug, Error)]
pub enum PlankrError {
    /// User input failed a guard (missing attestation, zero countdown
    /// target, malformed duration, setter used outside idle).
    #[error("{0}")]
    Validation(String),

    /// The hosted platform rejected a request or returned an error body.
    #[error("platform error: {0}")]
    Platform(String),

    /// HTTP transport failure talking to the hosted platform.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local SQLite failure.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be loaded, parsed, or is incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// A referenced item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// JSON (de)serialization failure.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlankrError {
    /// Build a validation error from any displayable message.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True if this error is worth retrying later (transport or platform
    /// fault rather than caller mistake). Used to decide whether a failed
    /// record should be parked in the pending queue.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Platform(_))
    }
}
