//! Transcript source trait definition
//!
//! [`TranscriptSource`] abstracts one page request against the transcript
//! search endpoint so the pagination engine can run against the real API or a
//! scripted source in tests.

use crate::adapters::credentials::Credentials;
use crate::domain::{ApiError, CallTranscript, TimeWindow};
use async_trait::async_trait;

/// One page request: a window plus the cursor issued by the previous page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub window: TimeWindow,

    /// Absent on the first request of a window
    pub cursor: Option<String>,
}

impl PageRequest {
    /// First request of a window
    pub fn first(window: TimeWindow) -> Self {
        Self {
            window,
            cursor: None,
        }
    }

    /// Follow-up request carrying `cursor`
    pub fn next(window: TimeWindow, cursor: impl Into<String>) -> Self {
        Self {
            window,
            cursor: Some(cursor.into()),
        }
    }
}

/// Normalised page of a transcript search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Calls in arrival order
    pub records: Vec<CallTranscript>,

    /// Present while more records remain; the only termination signal
    pub next_cursor: Option<String>,

    /// Total the API declares for the whole window
    pub total_records: Option<u64>,

    /// Advisory page size reported by the API
    pub page_size: Option<u32>,

    /// Page number reported by the API
    pub page_number: Option<u32>,
}

/// Trait for transcript page fetchers
///
/// Implementations perform exactly one request per call. Retries are the
/// caller's policy.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetches one page of transcripts
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthenticationFailed`] when the credentials are rejected
    /// - [`ApiError::TransientServerError`] / [`ApiError::Timeout`] for
    ///   retryable failures
    /// - [`ApiError::MalformedResponse`] when the body lacks required fields
    async fn fetch_page(
        &self,
        credentials: &Credentials,
        request: &PageRequest,
    ) -> Result<PageResult, ApiError>;

    /// Page size sent with each request, if any
    fn page_size_hint(&self) -> Option<u32> {
        None
    }
}
