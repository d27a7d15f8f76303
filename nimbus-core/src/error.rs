//! Error types for Nimbus.
//!
//! Every failure a lookup can hit is a [`NimbusError`]; [`NimbusError::kind`]
//! sorts it into client construction, upstream fetch or serialization.

use thiserror::Error;

/// Result type alias using `NimbusError`.
pub type Result<T> = std::result::Result<T, NimbusError>;

/// Main error type for all Nimbus operations.
#[derive(Debug, Error)]
pub enum NimbusError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CLIENT CONSTRUCTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// API key missing or malformed.
    #[error("Invalid API key: expected {expected} alphanumeric characters, got {actual}")]
    InvalidApiKey {
        /// Required key length
        expected: usize,
        /// Length of the key supplied
        actual: usize,
    },

    /// Language code not accepted by the upstream API.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Unit code not one of C, F or K.
    #[error("Unsupported unit of measure: {0}")]
    UnsupportedUnit(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Upstream `message`, or the raw body
        message: String,
    },

    /// Upstream body could not be decoded.
    #[error("Failed to decode upstream response: {0}")]
    DecodeError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Weather record could not be rendered to a payload.
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure classes of a weather lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upstream client could not be configured.
    ClientConstruction,
    /// The upstream call failed.
    UpstreamFetch,
    /// The fetched record could not be rendered.
    Serialization,
    /// Process configuration is invalid.
    Config,
}

impl NimbusError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NimbusError::InvalidApiKey { .. }
            | NimbusError::UnsupportedLanguage(_)
            | NimbusError::UnsupportedUnit(_) => ErrorKind::ClientConstruction,
            NimbusError::HttpError(_)
            | NimbusError::UpstreamStatus { .. }
            | NimbusError::DecodeError(_) => ErrorKind::UpstreamFetch,
            NimbusError::SerializationError(_) => ErrorKind::Serialization,
            NimbusError::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// Returns true if a later attempt could succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            NimbusError::HttpError(_) => true,
            NimbusError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for NimbusError {
    fn from(err: serde_json::Error) -> Self {
        NimbusError::SerializationError(err.to_string())
    }
}
