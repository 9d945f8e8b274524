//! Call transcript domain models
//!
//! A call transcript is an ordered list of sentence fragments. The wire format
//! nests sentences inside speaker/topic segments; by the time a transcript
//! reaches the domain layer those segments have been flattened in order.

use crate::domain::ids::CallId;
use serde::{Deserialize, Serialize};

/// A single sentence fragment of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Spoken text
    pub text: String,
}

impl Sentence {
    /// Creates a sentence from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Full transcript of one recorded call
///
/// # Examples
///
/// ```
/// use gong_transcripts::domain::{CallTranscript, Sentence};
///
/// let call = CallTranscript::new(
///     None,
///     vec![Sentence::new("Hello "), Sentence::new("there.")],
/// );
/// assert_eq!(call.sentences.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTranscript {
    /// Call identifier, when the API supplied one
    pub call_id: Option<CallId>,

    /// Sentences in spoken order
    pub sentences: Vec<Sentence>,
}

impl CallTranscript {
    /// Creates a new call transcript
    pub fn new(call_id: Option<CallId>, sentences: Vec<Sentence>) -> Self {
        Self {
            call_id,
            sentences,
        }
    }

    /// Whether the call carries no spoken text at all
    pub fn is_empty(&self) -> bool {
        self.sentences.iter().all(|s| s.text.is_empty())
    }
}

/// Records accumulated for a single time window
///
/// Grows monotonically while a window is paginated and never spans windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowResult {
    /// Transcripts in arrival order
    pub records: Vec<CallTranscript>,

    /// Number of pages fetched to build this result
    pub pages: u32,

    /// Most recent `totalRecords` reported by the API
    pub declared_total: Option<u64>,
}

impl WindowResult {
    /// Creates an empty window result
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one page worth of records
    pub fn extend_page(&mut self, records: Vec<CallTranscript>) {
        self.records.extend(records);
        self.pages += 1;
    }

    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were accumulated
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
