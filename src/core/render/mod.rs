//! Transcript rendering

pub mod assembler;

pub use assembler::{TranscriptAssembler, CALL_SEPARATOR};
