//! Result type alias
//!
//! Convenience alias that uses [`TranscriptError`] as the error type.

use super::errors::TranscriptError;

/// Result type alias for run-level operations
///
/// # Examples
///
/// ```
/// use gong_transcripts::domain::result::Result;
/// use gong_transcripts::domain::errors::TranscriptError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TranscriptError::Configuration("window_count must be >= 1".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TranscriptError>;
