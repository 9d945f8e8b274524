//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. Errors are split by
//! the scope they affect: a single page request ([`ApiError`]), a single window
//! ([`WindowError`]) or the whole run ([`TranscriptError`]).
//! None of them expose third-party HTTP client types.

use crate::domain::transcript::WindowResult;
use thiserror::Error;

/// Main error type
///
/// Used for run-level failures and as the common currency of `?` across the crate.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Invalid configuration (bad dates, misaligned window start, zero windows)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No credentials stored and none supplied interactively
    #[error("Credentials unavailable: {0}")]
    CredentialUnavailable(String),

    /// Transcript API errors
    #[error("Transcript API error: {0}")]
    Api(#[from] ApiError),

    /// Window-level export errors
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The run was cancelled by a shutdown signal
    #[error("Export cancelled")]
    Cancelled,

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a single page request against the transcript API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Credentials rejected by the API (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Non-2xx response other than authentication, or a connection failure
    #[error("Transient server error{}: {}", status_suffix(.status), .message)]
    TransientServerError {
        status: Option<u16>,
        message: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body is not JSON or lacks required fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl ApiError {
    /// Whether the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::TransientServerError { .. } | ApiError::Timeout(_)
        )
    }

    /// Whether this error invalidates every subsequent request of the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::AuthenticationFailed(_))
    }

    /// Taxonomy bucket for reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::AuthenticationFailed(_) => ErrorKind::AuthenticationFailed,
            ApiError::TransientServerError { .. } | ApiError::Timeout(_) => {
                ErrorKind::TransientServerError
            }
            ApiError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Errors that end the retrieval of one window
#[derive(Debug, Error)]
pub enum WindowError {
    /// A page request failed (after any retries)
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API broke its own pagination contract (repeated cursor, runaway count)
    #[error("Pagination invariant violated: {0}")]
    PaginationInvariantViolation(String),

    /// Pagination finished but the record count disagrees with the declared total
    #[error("Incomplete download: expected {expected} records, received {received}")]
    IncompleteDownload {
        expected: u64,
        received: u64,
        /// Records retrieved before the mismatch was detected
        partial: Box<WindowResult>,
    },

    /// Shutdown requested between page fetches
    #[error("Window retrieval cancelled")]
    Cancelled,
}

impl WindowError {
    /// Taxonomy bucket for reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            WindowError::Api(e) => e.kind(),
            WindowError::PaginationInvariantViolation(_) => {
                ErrorKind::PaginationInvariantViolation
            }
            WindowError::IncompleteDownload { .. } => ErrorKind::IncompleteDownload,
            WindowError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether the whole run must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, WindowError::Api(e) if e.is_fatal())
    }
}

/// Error taxonomy used in summaries and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AuthenticationFailed,
    TransientServerError,
    MalformedResponse,
    PaginationInvariantViolation,
    IncompleteDownload,
    InvalidConfiguration,
    CredentialUnavailable,
    OutputFailed,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",
            ErrorKind::TransientServerError => "TransientServerError",
            ErrorKind::MalformedResponse => "MalformedResponse",
            ErrorKind::PaginationInvariantViolation => "PaginationInvariantViolation",
            ErrorKind::IncompleteDownload => "IncompleteDownload",
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::CredentialUnavailable => "CredentialUnavailable",
            ErrorKind::OutputFailed => "OutputFailed",
            ErrorKind::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

impl TranscriptError {
    /// Taxonomy bucket for reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscriptError::Configuration(_) => ErrorKind::InvalidConfiguration,
            TranscriptError::CredentialUnavailable(_) => ErrorKind::CredentialUnavailable,
            TranscriptError::Api(e) => e.kind(),
            TranscriptError::Window(e) => e.kind(),
            TranscriptError::Io(_) | TranscriptError::Serialization(_) => ErrorKind::OutputFailed,
            TranscriptError::Cancelled => ErrorKind::Cancelled,
            TranscriptError::Other(_) => ErrorKind::OutputFailed,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TranscriptError {
    fn from(err: std::io::Error) -> Self {
        TranscriptError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TranscriptError {
    fn from(err: serde_json::Error) -> Self {
        TranscriptError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TranscriptError {
    fn from(err: toml::de::Error) -> Self {
        TranscriptError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_error_display() {
        let err = TranscriptError::Configuration("window_count must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: window_count must be >= 1"
        );
    }

    #[test]
    fn test_transient_error_display_with_status() {
        let err = ApiError::TransientServerError {
            status: Some(503),
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Transient server error (503): unavailable");

        let err = ApiError::TransientServerError {
            status: None,
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Transient server error: connection reset");
    }

    #[test]
    fn test_api_error_classification() {
        assert!(ApiError::Timeout("30s".to_string()).is_retryable());
        assert!(ApiError::TransientServerError {
            status: Some(500),
            message: String::new()
        }
        .is_retryable());
        assert!(!ApiError::AuthenticationFailed("401".to_string()).is_retryable());
        assert!(!ApiError::MalformedResponse("no records".to_string()).is_retryable());

        assert!(ApiError::AuthenticationFailed("401".to_string()).is_fatal());
        assert!(!ApiError::MalformedResponse("no records".to_string()).is_fatal());
    }

    #[test]
    fn test_timeout_reports_as_transient() {
        assert_eq!(
            ApiError::Timeout("30s".to_string()).kind(),
            ErrorKind::TransientServerError
        );
    }

    #[test]
    fn test_window_error_kinds() {
        let err: WindowError = ApiError::AuthenticationFailed("401".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
        assert!(err.is_fatal());

        let err = WindowError::IncompleteDownload {
            expected: 300,
            received: 237,
            partial: Box::default(),
        };
        assert_eq!(err.kind(), ErrorKind::IncompleteDownload);
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Incomplete download: expected 300 records, received 237"
        );
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::MalformedResponse("missing records".to_string());
        let err: TranscriptError = api_err.into();
        assert!(matches!(err, TranscriptError::Api(_)));
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: TranscriptError = io_err.into();
        assert!(matches!(err, TranscriptError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TranscriptError = json_err.into();
        assert!(matches!(err, TranscriptError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: TranscriptError = toml_err.into();
        assert!(matches!(err, TranscriptError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(
            ErrorKind::PaginationInvariantViolation.to_string(),
            "PaginationInvariantViolation"
        );
    }
}
