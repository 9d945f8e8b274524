//! Transcript API adapter
//!
//! This module provides the integration with the call-transcription API: the
//! [`TranscriptSource`] abstraction, its HTTP implementation and the wire models.

pub mod client;
pub mod models;
pub mod source;

pub use client::GongClient;
pub use models::{TranscriptPageResponse, TranscriptSearchRequest};
pub use source::{PageRequest, PageResult, TranscriptSource};
