//! Domain models and types.
//!
//! This module contains the core domain models and error types shared by every
//! layer of the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CallId`], [`WorkspaceId`])
//! - **Transcript models** ([`CallTranscript`], [`Sentence`], [`WindowResult`])
//! - **Time windows** ([`TimeWindow`], [`WindowLength`])
//! - **Error types** ([`TranscriptError`], [`ApiError`], [`WindowError`], [`ErrorKind`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Run-level operations return [`Result<T, TranscriptError>`]:
//!
//! ```rust,no_run
//! use gong_transcripts::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = gong_transcripts::config::load_config("gong.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! # Windows
//!
//! ```rust
//! use gong_transcripts::domain::WindowLength;
//!
//! let length: WindowLength = "3 months".parse().unwrap();
//! assert_eq!(length, WindowLength::Months(3));
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod transcript;
pub mod window;

// Re-export commonly used types for convenience
pub use errors::{ApiError, ErrorKind, TranscriptError, WindowError};
pub use ids::{CallId, WorkspaceId};
pub use result::Result;
pub use transcript::{CallTranscript, Sentence, WindowResult};
pub use window::{TimeWindow, WindowLength};
