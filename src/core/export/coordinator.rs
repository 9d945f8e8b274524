//! Export coordinator - main orchestrator for the export process
//!
//! Walks the planned windows in order. Each window is drained by the
//! paginator, deduplicated against calls already exported in this run,
//! rendered and written as `<label>.txt`. Window-scoped failures are recorded
//! and the run moves on; an authentication failure stops the run.

use crate::adapters::credentials::{CredentialProvider, CredentialStore, Credentials};
use crate::adapters::gong::{GongClient, TranscriptSource};
use crate::config::AppConfig;
use crate::core::export::sink::{FsSink, OutputSink};
use crate::core::export::summary::{ExportSummary, WindowFailure, WindowReport};
use crate::core::paginate::WindowPaginator;
use crate::core::plan::{DateWindowPlanner, PlannedWindow};
use crate::core::render::TranscriptAssembler;
use crate::domain::ids::CallId;
use crate::domain::{CallTranscript, ErrorKind, Result, WindowError, WindowResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    config: AppConfig,
    planner: DateWindowPlanner,
    paginator: WindowPaginator,
    assembler: TranscriptAssembler,
    credentials: Arc<dyn CredentialProvider>,
    sink: Arc<dyn OutputSink>,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window plan is invalid.
    pub fn new(
        config: AppConfig,
        source: Arc<dyn TranscriptSource>,
        credentials: Arc<dyn CredentialProvider>,
        sink: Arc<dyn OutputSink>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self> {
        let planner = DateWindowPlanner::from_config(&config.export)?;
        let paginator = WindowPaginator::new(source, config.api.retry.clone())
            .with_verbose(config.export.verbose)
            .with_shutdown(shutdown.clone());

        Ok(Self {
            config,
            planner,
            paginator,
            assembler: TranscriptAssembler::new(),
            credentials,
            sink,
            shutdown,
        })
    }

    /// Create a coordinator wired to the HTTP API, the credential store and
    /// the configured output directory
    pub fn from_config(config: AppConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let source = Arc::new(GongClient::new(&config.api)?);
        let credentials = Arc::new(CredentialStore::from_config(&config.api));
        let sink = Arc::new(FsSink::new(&config.export.output_dir));
        Self::new(config, source, credentials, sink, shutdown)
    }

    pub fn planner(&self) -> &DateWindowPlanner {
        &self.planner
    }

    fn is_cancelled(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Execute the export
    ///
    /// # Errors
    ///
    /// Only pre-flight failures are returned as errors (credentials
    /// unavailable). Everything that happens once windows are being processed
    /// is reported through the [`ExportSummary`].
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.planner.count());
        summary.dry_run = self.config.application.dry_run;

        let credentials = self.credentials.get_credentials()?;

        tracing::info!(
            windows = self.planner.count(),
            window_length = %self.planner.window_length(),
            from = %self.config.export.history_start,
            dry_run = summary.dry_run,
            "Starting export"
        );

        let mut seen_calls: HashSet<CallId> = HashSet::new();

        for planned in self.planner.windows() {
            if self.is_cancelled() {
                tracing::info!(
                    window = %planned.label,
                    "Shutdown requested, stopping before window"
                );
                summary.interrupted = true;
                break;
            }

            match self.export_window(&credentials, &planned, &mut seen_calls).await {
                WindowOutcome::Done(report) => summary.add_window(report),
                WindowOutcome::Abort(report, reason) => {
                    summary.add_window(report);
                    summary.aborted = Some(reason);
                    break;
                }
                WindowOutcome::Interrupted => {
                    summary.interrupted = true;
                    break;
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn export_window(
        &self,
        credentials: &Credentials,
        planned: &PlannedWindow,
        seen_calls: &mut HashSet<CallId>,
    ) -> WindowOutcome {
        let started = Instant::now();
        let mut report = WindowReport::new(planned.index, &planned.label, planned.window);

        tracing::info!(
            window = %planned.label,
            range = %planned.window,
            "Downloading window"
        );

        match self.paginator.drain_window(credentials, &planned.window).await {
            Ok(result) => {
                fill_counts(&mut report, &result);
                crate::log_window_complete!(
                    planned.label,
                    result.len(),
                    result.pages,
                    started.elapsed()
                );
                self.write_window(planned, result, seen_calls, &mut report).await;
                WindowOutcome::Done(report)
            }
            Err(WindowError::IncompleteDownload {
                expected,
                received,
                partial,
            }) => {
                fill_counts(&mut report, &partial);
                let message = format!("API declared {expected} records, received {received}");
                tracing::warn!(window = %planned.label, expected, received, "Incomplete download");
                report.failure = Some(WindowFailure::new(ErrorKind::IncompleteDownload, message));

                if self.config.export.write_incomplete_windows {
                    self.write_window(planned, *partial, seen_calls, &mut report).await;
                }
                WindowOutcome::Done(report)
            }
            Err(WindowError::Cancelled) => {
                tracing::info!(window = %planned.label, "Window interrupted by shutdown");
                WindowOutcome::Interrupted
            }
            Err(e) => {
                tracing::error!(
                    window = %planned.label,
                    kind = %e.kind(),
                    error = %e,
                    "Window failed"
                );
                report.failure = Some(WindowFailure::new(e.kind(), e.to_string()));
                if e.is_fatal() {
                    WindowOutcome::Abort(report, e.to_string())
                } else {
                    WindowOutcome::Done(report)
                }
            }
        }
    }

    async fn write_window(
        &self,
        planned: &PlannedWindow,
        result: WindowResult,
        seen_calls: &mut HashSet<CallId>,
        report: &mut WindowReport,
    ) {
        let (calls, duplicates) = dedupe(result.records, seen_calls);
        report.duplicates_skipped = duplicates;
        if duplicates > 0 {
            tracing::info!(window = %planned.label, duplicates, "Skipped calls already exported");
        }

        let content = self.assembler.render_calls(&calls);
        let file_name = format!("{}.txt", planned.label);

        if self.config.application.dry_run {
            tracing::info!(
                window = %planned.label,
                file = %file_name,
                bytes = content.len(),
                "Dry run: skipping write"
            );
            return;
        }

        match self.sink.write_file(&file_name, &content).await {
            Ok(path) => {
                tracing::info!(window = %planned.label, path = %path.display(), "Wrote window");
                report.written_to = Some(path);
            }
            Err(e) => {
                tracing::error!(window = %planned.label, error = %e, "Failed to write window");
                // Keep an earlier failure (e.g. incomplete download) as the primary cause
                if report.failure.is_none() {
                    report.failure =
                        Some(WindowFailure::new(ErrorKind::OutputFailed, e.to_string()));
                }
            }
        }
    }
}

enum WindowOutcome {
    Done(WindowReport),
    Abort(WindowReport, String),
    Interrupted,
}

fn fill_counts(report: &mut WindowReport, result: &WindowResult) {
    report.records = result.len();
    report.pages = result.pages;
    report.declared_total = result.declared_total;
}

/// Drops calls whose id was already seen, keeping first-occurrence order
///
/// Calls without an id are always kept.
fn dedupe(
    records: Vec<CallTranscript>,
    seen: &mut HashSet<CallId>,
) -> (Vec<CallTranscript>, usize) {
    let mut duplicates = 0;
    let kept = records
        .into_iter()
        .filter(|call| match &call.call_id {
            Some(id) if !seen.insert(id.clone()) => {
                duplicates += 1;
                false
            }
            _ => true,
        })
        .collect();
    (kept, duplicates)
}
