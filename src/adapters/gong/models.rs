//! Transcript API wire models
//!
//! Request and response bodies of the transcript search endpoint. These are
//! kept apart from the domain models; [`TranscriptPageResponse::into_page`]
//! does the normalisation into a [`PageResult`].

use super::source::PageResult;
use crate::domain::ids::{CallId, WorkspaceId};
use crate::domain::{ApiError, CallTranscript, Sentence, TimeWindow};
use serde::{Deserialize, Serialize};

/// Body of a transcript search request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSearchRequest {
    pub filter: TranscriptFilter,

    /// Requested page size; the API may return a different size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Filter section of a search request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceId>,

    /// ISO-8601 start of the window
    pub from_date_time: String,

    /// ISO-8601 end of the window
    pub to_date_time: String,

    /// Continuation token from the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl TranscriptSearchRequest {
    /// Builds the request for one page of `window`
    pub fn new(
        window: &TimeWindow,
        workspace: Option<WorkspaceId>,
        cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Self {
        Self {
            filter: TranscriptFilter {
                workspace,
                from_date_time: format_instant(window.start()),
                to_date_time: format_instant(window.end()),
                cursor: cursor.map(str::to_string),
            },
            page_size,
        }
    }
}

fn format_instant(instant: chrono::DateTime<chrono::Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Response body of the transcript search endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptPageResponse {
    pub records: Option<RecordsInfo>,

    #[serde(default)]
    pub call_transcripts: Vec<CallTranscriptDto>,
}

/// Pagination block of a response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsInfo {
    pub total_records: Option<u64>,
    pub current_page_size: Option<u32>,
    pub current_page_number: Option<u32>,
    pub cursor: Option<String>,
}

/// One call in a response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTranscriptDto {
    pub call_id: Option<String>,

    #[serde(default)]
    pub transcript: Vec<TranscriptSegmentDto>,
}

/// A speaker/topic segment of a call
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSegmentDto {
    pub speaker_id: Option<String>,
    pub topic: Option<String>,

    #[serde(default)]
    pub sentences: Vec<SentenceDto>,
}

/// A sentence fragment with its offsets in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceDto {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub text: String,
}

impl CallTranscriptDto {
    /// Flattens segments into the call's ordered sentence list
    pub fn into_domain(self) -> CallTranscript {
        let call_id = self.call_id.and_then(|id| CallId::new(id).ok());
        let sentences = self
            .transcript
            .into_iter()
            .flat_map(|segment| segment.sentences)
            .map(|s| Sentence::new(s.text))
            .collect();
        CallTranscript::new(call_id, sentences)
    }
}

impl TranscriptPageResponse {
    /// Parses a raw response body
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] if the body is not valid JSON
    /// of the expected shape.
    pub fn parse(body: &str) -> Result<Self, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Normalises the response into a [`PageResult`]
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] if `records` or
    /// `records.totalRecords` is missing.
    pub fn into_page(self) -> Result<PageResult, ApiError> {
        let records = self.records.ok_or_else(|| {
            ApiError::MalformedResponse("response is missing 'records'".to_string())
        })?;
        let total_records = records.total_records.ok_or_else(|| {
            ApiError::MalformedResponse("response is missing 'records.totalRecords'".to_string())
        })?;

        Ok(PageResult {
            records: self
                .call_transcripts
                .into_iter()
                .map(CallTranscriptDto::into_domain)
                .collect(),
            next_cursor: records.cursor.filter(|c| !c.is_empty()),
            total_records: Some(total_records),
            page_size: records.current_page_size,
            page_number: records.current_page_number,
        })
    }
}
