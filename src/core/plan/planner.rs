//! Date window planning
//!
//! Splits the configured history into contiguous, non-overlapping windows.
//! Window `i` covers `[start + i·length, start + (i+1)·length − 1s]`, computed
//! with calendar arithmetic so month lengths and leap years are exact.

use crate::config::ExportConfig;
use crate::domain::window::window_resolution;
use crate::domain::{Result, TimeWindow, TranscriptError, WindowLength};
use chrono::{DateTime, Utc};

/// A window together with its position and file label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWindow {
    /// Zero-based position in the plan
    pub index: u32,

    pub window: TimeWindow,

    /// Period label, e.g. `2021-09` or `2021-09-11`
    pub label: String,
}

/// Produces the sequence of export windows
#[derive(Debug, Clone)]
pub struct DateWindowPlanner {
    start: DateTime<Utc>,
    length: WindowLength,
    count: u32,
}

impl DateWindowPlanner {
    /// Creates a planner
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Configuration`] if `count` is zero, `start`
    /// is not the first instant of a period of `length`, or the last window
    /// ends outside the representable date range.
    pub fn new(start: DateTime<Utc>, length: WindowLength, count: u32) -> Result<Self> {
        if count < 1 {
            return Err(TranscriptError::Configuration(
                "window count must be at least 1".to_string(),
            ));
        }

        if !length.is_aligned(start) {
            return Err(TranscriptError::Configuration(format!(
                "history start {} is not aligned to a {} period boundary",
                start.to_rfc3339(),
                length
            )));
        }

        if length.advance(start, count).is_none() {
            return Err(TranscriptError::Configuration(format!(
                "{count} windows of {length} from {} exceed the supported date range",
                start.to_rfc3339()
            )));
        }

        Ok(Self {
            start,
            length,
            count,
        })
    }

    /// Creates a planner from the export configuration
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Self::new(
            config.history_start_instant(),
            config.window_length,
            config.window_count,
        )
    }

    /// Number of windows in the plan
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn window_length(&self) -> WindowLength {
        self.length
    }

    /// Lazily yields the planned windows in chronological order
    pub fn windows(&self) -> impl Iterator<Item = PlannedWindow> + '_ {
        (0..self.count).filter_map(move |index| self.window_at(index))
    }

    fn window_at(&self, index: u32) -> Option<PlannedWindow> {
        let start = self.length.advance(self.start, index)?;
        let next = self.length.advance(self.start, index + 1)?;
        let window = TimeWindow::new(start, next - window_resolution()).ok()?;

        Some(PlannedWindow {
            index,
            window,
            label: self.length.period_label(start),
        })
    }
}
