//! Transcript text rendering
//!
//! A call renders as its sentence texts concatenated with no separator; a
//! window renders as its calls in arrival order separated by a blank line.

use crate::domain::{CallTranscript, WindowResult};

/// Separator placed between calls of a window
pub const CALL_SEPARATOR: &str = "\n\n";

/// Pure renderer for call transcripts
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptAssembler;

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Renders one call as continuous text
    pub fn render_transcript(&self, call: &CallTranscript) -> String {
        call.sentences.iter().map(|s| s.text.as_str()).collect()
    }

    /// Renders a list of calls
    pub fn render_calls(&self, calls: &[CallTranscript]) -> String {
        calls
            .iter()
            .map(|call| self.render_transcript(call))
            .collect::<Vec<_>>()
            .join(CALL_SEPARATOR)
    }

    /// Renders every record of a window
    pub fn render_window(&self, result: &WindowResult) -> String {
        self.render_calls(&result.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentence;

    fn call(parts: &[&str]) -> CallTranscript {
        CallTranscript::new(None, parts.iter().map(|p| Sentence::new(*p)).collect())
    }

    #[test]
    fn test_sentences_are_concatenated_without_separator() {
        let assembler = TranscriptAssembler::new();
        assert_eq!(
            assembler.render_transcript(&call(&["Hello", "world", "."])),
            "Helloworld."
        );
    }

    #[test]
    fn test_calls_are_separated_by_blank_line() {
        let mut result = WindowResult::new();
        result.extend_page(vec![call(&["A1 ", "A2"]), call(&["B1"])]);
        result.extend_page(vec![call(&["C1"])]);

        let rendered = TranscriptAssembler::new().render_window(&result);
        assert_eq!(rendered, "A1 A2\n\nB1\n\nC1");
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut result = WindowResult::new();
        result.extend_page(vec![call(&["x", "y"]), call(&["z"])]);

        let assembler = TranscriptAssembler::new();
        assert_eq!(assembler.render_window(&result), assembler.render_window(&result));
    }

    #[test]
    fn test_empty_window_renders_empty_string() {
        assert_eq!(TranscriptAssembler::new().render_window(&WindowResult::new()), "");
    }

    #[test]
    fn test_call_without_sentences_keeps_its_slot() {
        let rendered =
            TranscriptAssembler::new().render_calls(&[call(&["a"]), call(&[]), call(&["b"])]);
        assert_eq!(rendered, "a\n\n\n\nb");
    }
}
