//! Transcript API HTTP client
//!
//! [`GongClient`] implements [`TranscriptSource`] over `reqwest`. Each call is a
//! single POST with HTTP basic authentication; status codes and transport
//! failures are classified into [`ApiError`].

use super::models::{TranscriptPageResponse, TranscriptSearchRequest};
use super::source::{PageRequest, PageResult, TranscriptSource};
use crate::adapters::credentials::Credentials;
use crate::config::ApiConfig;
use crate::domain::ids::WorkspaceId;
use crate::domain::{ApiError, Result, TranscriptError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Transcript search client
///
/// # Example
///
/// ```no_run
/// use gong_transcripts::adapters::credentials::Credentials;
/// use gong_transcripts::adapters::gong::{GongClient, PageRequest, TranscriptSource};
/// use gong_transcripts::config::ApiConfig;
/// use gong_transcripts::domain::TimeWindow;
/// use chrono::{TimeZone, Utc};
///
/// # async fn example() -> gong_transcripts::domain::Result<()> {
/// let client = GongClient::new(&ApiConfig::default())?;
/// let credentials = Credentials::new("id", "secret");
/// let window = TimeWindow::new(
///     Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2021, 9, 30, 23, 59, 59).unwrap(),
/// )
/// .unwrap();
///
/// let page = client.fetch_page(&credentials, &PageRequest::first(window)).await?;
/// println!("{} of {:?} records", page.records.len(), page.total_records);
/// # Ok(())
/// # }
/// ```
pub struct GongClient {
    url: String,
    client: Client,
    workspace_id: Option<WorkspaceId>,
    page_size_hint: Option<u32>,
    timeout: Duration,
}

impl GongClient {
    /// Creates a client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .build()
            .map_err(|e| {
                TranscriptError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            url: config.transcript_url(),
            client,
            workspace_id: config.workspace_id,
            page_size_hint: config.page_size_hint,
            timeout,
        })
    }

    /// Endpoint every page request is sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    fn auth_header_value(credentials: &Credentials) -> String {
        let pair = format!(
            "{}:{}",
            credentials.client_id,
            credentials.client_secret.expose_secret()
        );
        let encoded = general_purpose::STANDARD.encode(pair.as_bytes());
        format!("Basic {encoded}")
    }

    fn classify_send_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(format!(
                "no response within {}s: {err}",
                self.timeout.as_secs()
            ))
        } else {
            ApiError::TransientServerError {
                status: None,
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl TranscriptSource for GongClient {
    async fn fetch_page(
        &self,
        credentials: &Credentials,
        request: &PageRequest,
    ) -> std::result::Result<PageResult, ApiError> {
        let body = TranscriptSearchRequest::new(
            &request.window,
            self.workspace_id,
            request.cursor.as_deref(),
            self.page_size_hint,
        );

        tracing::trace!(
            url = %self.url,
            window = %request.window,
            has_cursor = request.cursor.is_some(),
            "Requesting transcript page"
        );

        let resp = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, Self::auth_header_value(credentials))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.classify_send_error(e))?;

        match status {
            s if s.is_success() => TranscriptPageResponse::parse(&text)?.into_page(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                ApiError::AuthenticationFailed(format!("status {status}: {}", truncate(&text))),
            ),
            _ => Err(ApiError::TransientServerError {
                status: Some(status.as_u16()),
                message: truncate(&text).to_string(),
            }),
        }
    }

    fn page_size_hint(&self) -> Option<u32> {
        self.page_size_hint
    }
}

fn truncate(body: &str) -> &str {
    const MAX: usize = 512;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
