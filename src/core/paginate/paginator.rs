//! Cursor pagination for a single window
//!
//! [`WindowPaginator::drain_window`] requests pages until the API stops
//! returning a cursor. Cursor presence is the only termination signal; page
//! sizes are advisory. A repeated cursor, or a running count that overshoots
//! the declared total by more than a page, fails the window instead of
//! looping. The final count is cross-checked against the declared total.

use crate::adapters::credentials::Credentials;
use crate::adapters::gong::{PageRequest, PageResult, TranscriptSource};
use crate::config::RetryConfig;
use crate::domain::{ApiError, TimeWindow, WindowError, WindowResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Drains every page of a window from a [`TranscriptSource`]
pub struct WindowPaginator {
    source: Arc<dyn TranscriptSource>,
    retry: RetryConfig,
    verbose: bool,
    shutdown: Option<watch::Receiver<bool>>,
}

impl WindowPaginator {
    pub fn new(source: Arc<dyn TranscriptSource>, retry: RetryConfig) -> Self {
        Self {
            source,
            retry,
            verbose: false,
            shutdown: None,
        }
    }

    /// Log each downloaded page at info instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Stop between pages (and between retries) once `shutdown` turns true
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Retrieves every record of `window`
    ///
    /// # Errors
    ///
    /// - [`WindowError::Api`] when a page fails (after retries for transient errors)
    /// - [`WindowError::PaginationInvariantViolation`] on a repeated cursor or a
    ///   runaway record count
    /// - [`WindowError::IncompleteDownload`] when the final count disagrees with
    ///   the declared total; the partial result is attached
    /// - [`WindowError::Cancelled`] when shutdown was requested
    pub async fn drain_window(
        &self,
        credentials: &Credentials,
        window: &TimeWindow,
    ) -> Result<WindowResult, WindowError> {
        let mut result = WindowResult::new();
        let mut request = PageRequest::first(*window);
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut largest_page: u64 = 0;

        loop {
            if self.is_cancelled() {
                return Err(WindowError::Cancelled);
            }

            let PageResult {
                records,
                next_cursor,
                total_records,
                page_size,
                page_number,
            } = self.fetch_with_retry(credentials, &request).await?;

            largest_page = largest_page.max(records.len() as u64);
            if total_records.is_some() {
                result.declared_total = total_records;
            }
            result.extend_page(records);

            let received = result.len() as u64;
            self.log_page(
                window,
                page_number.unwrap_or(result.pages),
                received,
                result.declared_total,
            );

            if let Some(total) = result.declared_total {
                let slack = self
                    .source
                    .page_size_hint()
                    .or(page_size)
                    .map(u64::from)
                    .unwrap_or(0)
                    .max(largest_page);
                if received > total.saturating_add(slack) {
                    return Err(WindowError::PaginationInvariantViolation(format!(
                        "received {received} records, API declared {total} (page slack {slack})"
                    )));
                }
            }

            match next_cursor {
                None => break,
                Some(cursor) => {
                    if !seen_cursors.insert(cursor.clone()) {
                        return Err(WindowError::PaginationInvariantViolation(format!(
                            "cursor '{cursor}' returned more than once after {} page(s)",
                            result.pages
                        )));
                    }
                    request = PageRequest::next(*window, cursor);
                }
            }
        }

        if let Some(expected) = result.declared_total {
            let received = result.len() as u64;
            if expected != received {
                return Err(WindowError::IncompleteDownload {
                    expected,
                    received,
                    partial: Box::new(result),
                });
            }
        }

        Ok(result)
    }

    async fn fetch_with_retry(
        &self,
        credentials: &Credentials,
        request: &PageRequest,
    ) -> Result<PageResult, WindowError> {
        let max_attempts = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.source.fetch_page(credentials, request).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    crate::log_retry_attempt!(attempt, max_attempts, e);
                    if self.sleep_unless_cancelled(self.retry.delay_for_attempt(attempt)).await {
                        return Err(WindowError::Cancelled);
                    }
                }
                Err(e) => return Err(escalate(e, attempt)),
            }
        }
    }

    /// Sleeps for `delay`; returns true if shutdown was requested meanwhile
    async fn sleep_unless_cancelled(&self, delay: Duration) -> bool {
        match &self.shutdown {
            Some(rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = wait_for_shutdown(rx.clone()) => {}
                }
                self.is_cancelled()
            }
            None => {
                tokio::time::sleep(delay).await;
                false
            }
        }
    }

    fn log_page(&self, window: &TimeWindow, page: u32, received: u64, total: Option<u64>) {
        let total = total.map_or_else(|| "?".to_string(), |t| t.to_string());
        if self.verbose {
            tracing::info!(window = %window, "Page {page} downloaded ({received} / {total})");
        } else {
            tracing::debug!(window = %window, "Page {page} downloaded ({received} / {total})");
        }
    }
}

fn escalate(err: ApiError, attempts: usize) -> WindowError {
    if attempts > 1 {
        tracing::warn!(attempts, error = %err, "Giving up on page request");
    }
    WindowError::Api(err)
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CallTranscript, Sentence};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<PageResult, ApiError>>>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<PageResult, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranscriptSource for ScriptedSource {
        async fn fetch_page(
            &self,
            _credentials: &Credentials,
            request: &PageRequest,
        ) -> Result<PageResult, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::MalformedResponse("script exhausted".into())))
        }
    }

    fn page(n: usize, cursor: Option<&str>, total: u64) -> Result<PageResult, ApiError> {
        Ok(PageResult {
            records: (0..n)
                .map(|_| CallTranscript::new(None, vec![Sentence::new("x")]))
                .collect(),
            next_cursor: cursor.map(str::to_string),
            total_records: Some(total),
            page_size: None,
            page_number: None,
        })
    }

    fn september() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 9, 30, 23, 59, 59).unwrap(),
        )
        .unwrap()
    }

    fn fast_retry(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 1,
            backoff_multiplier: 1.0,
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("id", "secret")
    }

    #[tokio::test]
    async fn test_drains_until_cursor_absent() {
        let source = ScriptedSource::new(vec![
            page(100, Some("c3"), 237),
            page(100, Some("c2"), 237),
            page(37, None, 237),
        ]);
        let paginator = WindowPaginator::new(source.clone(), fast_retry(1));

        let result = paginator.drain_window(&credentials(), &september()).await.unwrap();
        assert_eq!(result.len(), 237);
        assert_eq!(result.pages, 3);

        let cursors: Vec<_> = source.requests().into_iter().map(|r| r.cursor).collect();
        assert_eq!(cursors, vec![None, Some("c3".into()), Some("c2".into())]);
    }

    #[tokio::test]
    async fn test_short_page_with_cursor_does_not_terminate() {
        let source = ScriptedSource::new(vec![page(3, Some("a"), 5), page(2, None, 5)]);
        let paginator = WindowPaginator::new(source, fast_retry(1));

        let result = paginator.drain_window(&credentials(), &september()).await.unwrap();
        assert_eq!(result.len(), 5);
    }

    #[tokio::test]
    async fn test_repeated_cursor_is_invariant_violation() {
        let source = ScriptedSource::new(vec![
            page(10, Some("same"), 1000),
            page(10, Some("same"), 1000),
            page(10, None, 1000),
        ]);
        let paginator = WindowPaginator::new(source.clone(), fast_retry(1));

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(matches!(err, WindowError::PaginationInvariantViolation(_)));
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_runaway_count_is_invariant_violation() {
        let source = ScriptedSource::new(vec![
            page(10, Some("a"), 10),
            page(10, Some("b"), 10),
            page(10, Some("c"), 10),
        ]);
        let paginator = WindowPaginator::new(source, fast_retry(1));

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(matches!(err, WindowError::PaginationInvariantViolation(_)));
    }

    #[tokio::test]
    async fn test_count_mismatch_is_incomplete_download_with_partial() {
        let source = ScriptedSource::new(vec![
            page(100, Some("c3"), 300),
            page(100, Some("c2"), 300),
            page(37, None, 300),
        ]);
        let paginator = WindowPaginator::new(source, fast_retry(1));

        match paginator.drain_window(&credentials(), &september()).await {
            Err(WindowError::IncompleteDownload {
                expected,
                received,
                partial,
            }) => {
                assert_eq!(expected, 300);
                assert_eq!(received, 237);
                assert_eq!(partial.len(), 237);
            }
            other => panic!("expected IncompleteDownload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_window() {
        let source = ScriptedSource::new(vec![page(0, None, 0)]);
        let paginator = WindowPaginator::new(source, fast_retry(1));

        let result = paginator.drain_window(&credentials(), &september()).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.pages, 1);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let source = ScriptedSource::new(vec![
            Err(ApiError::TransientServerError {
                status: Some(503),
                message: "unavailable".into(),
            }),
            Err(ApiError::Timeout("slow".into())),
            page(2, None, 2),
        ]);
        let paginator = WindowPaginator::new(source.clone(), fast_retry(3));

        let result = paginator.drain_window(&credentials(), &september()).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted_escalates() {
        let source = ScriptedSource::new(vec![
            Err(ApiError::TransientServerError {
                status: Some(500),
                message: "boom".into(),
            }),
            Err(ApiError::TransientServerError {
                status: Some(500),
                message: "boom".into(),
            }),
        ]);
        let paginator = WindowPaginator::new(source.clone(), fast_retry(2));

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(matches!(
            err,
            WindowError::Api(ApiError::TransientServerError { status: Some(500), .. })
        ));
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_not_retried() {
        let source = ScriptedSource::new(vec![Err(ApiError::AuthenticationFailed(
            "status 401".into(),
        ))]);
        let paginator = WindowPaginator::new(source.clone(), fast_retry(5));

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(source.requests().len(), 1);
    }

    /// Requests shutdown once `after` requests have reached `inner`
    struct ShutdownAfter {
        inner: Arc<ScriptedSource>,
        after: usize,
        tx: watch::Sender<bool>,
    }

    #[async_trait]
    impl TranscriptSource for ShutdownAfter {
        async fn fetch_page(
            &self,
            credentials: &Credentials,
            request: &PageRequest,
        ) -> Result<PageResult, ApiError> {
            let page = self.inner.fetch_page(credentials, request).await;
            if self.inner.requests().len() >= self.after {
                let _ = self.tx.send(true);
            }
            page
        }
    }

    #[tokio::test]
    async fn test_cancelled_between_pages() {
        let inner = ScriptedSource::new(vec![
            page(1, Some("c1"), 3),
            page(1, Some("c2"), 3),
            page(1, None, 3),
        ]);
        let (tx, rx) = watch::channel(false);
        let source = Arc::new(ShutdownAfter {
            inner: inner.clone(),
            after: 1,
            tx,
        });
        let paginator = WindowPaginator::new(source, fast_retry(1)).with_shutdown(rx);

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(matches!(err, WindowError::Cancelled));
        assert_eq!(inner.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_during_retry_backoff() {
        let source = ScriptedSource::new(vec![
            Err(ApiError::TransientServerError {
                status: Some(503),
                message: "unavailable".into(),
            }),
            page(1, None, 1),
        ]);
        let retry = RetryConfig {
            max_retries: 3,
            initial_delay_ms: 60_000,
            max_delay_ms: 60_000,
            backoff_multiplier: 1.0,
        };
        let (tx, rx) = watch::channel(false);
        let paginator = WindowPaginator::new(source.clone(), retry).with_shutdown(rx);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            paginator.drain_window(&credentials(), &september()),
        )
        .await
        .expect("backoff sleep was not interrupted")
        .unwrap_err();
        assert!(matches!(err, WindowError::Cancelled));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_page() {
        let source = ScriptedSource::new(vec![page(1, None, 1)]);
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let paginator = WindowPaginator::new(source.clone(), fast_retry(1)).with_shutdown(rx);

        let err = paginator.drain_window(&credentials(), &september()).await.unwrap_err();
        assert!(matches!(err, WindowError::Cancelled));
        assert!(source.requests().is_empty());
    }
}
