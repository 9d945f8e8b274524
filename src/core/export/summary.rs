//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{ErrorKind, TimeWindow};
use std::path::PathBuf;
use std::time::Duration;

/// Failure recorded against one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl WindowFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of one attempted window
#[derive(Debug, Clone)]
pub struct WindowReport {
    /// Zero-based position in the plan
    pub index: u32,

    /// Period label, e.g. `2021-09`
    pub label: String,

    pub window: TimeWindow,

    /// Records retrieved (before deduplication)
    pub records: usize,

    /// Pages fetched
    pub pages: u32,

    /// Total the API declared for the window
    pub declared_total: Option<u64>,

    /// Records dropped because their call was already exported in this run
    pub duplicates_skipped: usize,

    /// File written for this window, if any
    pub written_to: Option<PathBuf>,

    pub failure: Option<WindowFailure>,
}

impl WindowReport {
    pub fn new(index: u32, label: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            index,
            label: label.into(),
            window,
            records: 0,
            pages: 0,
            declared_total: None,
            duplicates_skipped: 0,
            written_to: None,
            failure: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Windows in the plan
    pub windows_planned: u32,

    /// Per-window outcomes in plan order
    pub windows: Vec<WindowReport>,

    /// Records downloaded across all windows (before deduplication)
    pub total_records: usize,

    /// Records dropped as duplicates across the run
    pub duplicates_skipped: usize,

    /// Reason the run stopped early on an authentication failure
    pub aborted: Option<String>,

    /// Whether a shutdown signal stopped the run
    pub interrupted: bool,

    /// Whether files were left unwritten on purpose
    pub dry_run: bool,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(windows_planned: u32) -> Self {
        Self {
            windows_planned,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the outcome of a window
    pub fn add_window(&mut self, report: WindowReport) {
        self.total_records += report.records;
        self.duplicates_skipped += report.duplicates_skipped;
        self.windows.push(report);
    }

    /// Windows attempted so far
    pub fn windows_attempted(&self) -> usize {
        self.windows.len()
    }

    /// Windows that recorded a failure
    pub fn failed_windows(&self) -> impl Iterator<Item = &WindowReport> {
        self.windows.iter().filter(|w| w.is_failed())
    }

    /// Files written during the run
    pub fn files_written(&self) -> usize {
        self.windows.iter().filter(|w| w.written_to.is_some()).count()
    }

    /// Check if the export was successful (no failures, not aborted or interrupted)
    pub fn is_successful(&self) -> bool {
        self.aborted.is_none() && !self.interrupted && self.failed_windows().next().is_none()
    }

    /// Process exit code for this outcome
    ///
    /// 130 interrupted, 3 authentication abort, 1 any failed window, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.interrupted {
            130
        } else if self.aborted.is_some() {
            3
        } else if self.failed_windows().next().is_some() {
            1
        } else {
            0
        }
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            windows_planned = self.windows_planned,
            windows_attempted = self.windows_attempted(),
            total_records = self.total_records,
            duplicates_skipped = self.duplicates_skipped,
            files_written = self.files_written(),
            duration_secs = self.duration.as_secs(),
            dry_run = self.dry_run,
            "Export completed"
        );

        if let Some(reason) = &self.aborted {
            tracing::error!(reason = %reason, "Export aborted");
        }

        for window in self.failed_windows() {
            if let Some(failure) = &window.failure {
                tracing::warn!(
                    window = %window.label,
                    kind = %failure.kind,
                    message = %failure.message,
                    "Window failed"
                );
            }
        }
    }

    /// Human-readable per-window report
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        for window in &self.windows {
            let status = match &window.failure {
                Some(failure) => format!("FAILED {}: {}", failure.kind, failure.message),
                None => "ok".to_string(),
            };
            out.push_str(&format!(
                "  {:<10} {:>7} records  {}\n",
                window.label, window.records, status
            ));
        }
        out
    }
}
