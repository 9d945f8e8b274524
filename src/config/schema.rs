//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `gong.toml`.
//! Every section has defaults so an empty file (or no file at all) yields the
//! historical behaviour: one three-month window starting 2021-09-01.

use crate::config::SecretString;
use crate::domain::{TimeWindow, WindowLength, WorkspaceId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Transcript API connection and credentials
    #[serde(default)]
    pub api: ApiConfig,

    /// Export window and output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and render, but write no files)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration for transient API failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per page (1 = no retry)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "api.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "api.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "api.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        Ok(())
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for_attempt(&self, attempt: usize) -> std::time::Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay_ms = (self.initial_delay_ms as f64) * self.backoff_multiplier.powi(exponent);
        let delay_ms = (delay_ms as u64).min(self.max_delay_ms);
        std::time::Duration::from_millis(delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Transcript API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API (scheme and host)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the transcript search endpoint
    #[serde(default = "default_transcript_path")]
    pub transcript_path: String,

    /// Workspace to scope the search to (all workspaces when unset)
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Page size sent with each request; the API may ignore it
    #[serde(default)]
    pub page_size_hint: Option<u32>,

    /// API client id (access key)
    #[serde(default)]
    pub client_id: Option<String>,

    /// API client secret
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub client_secret: Option<SecretString>,

    /// File holding credentials captured by a previous interactive login
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// Prompt for credentials when none are configured or stored
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if !self.transcript_path.starts_with('/') {
            return Err(format!(
                "api.transcript_path must start with '/', got '{}'",
                self.transcript_path
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.page_size_hint == Some(0) {
            return Err("api.page_size_hint must be > 0 when set".to_string());
        }

        // A half-configured credential pair is almost always a typo
        let has_id = self.client_id.as_ref().is_some_and(|s| !s.is_empty());
        let has_secret = self
            .client_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        if has_id != has_secret {
            return Err(
                "api.client_id and api.client_secret must be provided together".to_string(),
            );
        }

        if self.credentials_file.trim().is_empty() {
            return Err("api.credentials_file cannot be empty".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }

    /// Full URL of the transcript search endpoint
    pub fn transcript_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.transcript_path
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            transcript_path: default_transcript_path(),
            workspace_id: None,
            timeout_seconds: default_timeout_seconds(),
            page_size_hint: None,
            client_id: None,
            client_secret: None,
            credentials_file: default_credentials_file(),
            interactive: true,
            retry: RetryConfig::default(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// First day of the first window; must open a period of `window_length`
    #[serde(default = "default_history_start")]
    pub history_start: NaiveDate,

    /// Length of each window, e.g. "1 month" or "10 days"
    #[serde(default = "default_window_length")]
    pub window_length: WindowLength,

    /// Number of consecutive windows to export
    #[serde(default = "default_window_count")]
    pub window_count: u32,

    /// Directory receiving one text file per window
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Still write a window whose record count disagrees with the API's total
    #[serde(default = "default_true")]
    pub write_incomplete_windows: bool,

    /// Log every downloaded page at info level
    #[serde(default)]
    pub verbose: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.window_count == 0 {
            return Err("export.window_count must be >= 1".to_string());
        }

        if !self.window_length.is_aligned(self.history_start_instant()) {
            return Err(format!(
                "export.history_start {} is not the first day of a period for window_length '{}'",
                self.history_start, self.window_length
            ));
        }

        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        Ok(())
    }

    /// `history_start` as the first instant of that day in UTC
    pub fn history_start_instant(&self) -> DateTime<Utc> {
        self.history_start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Whole range covered by the configured windows, if representable
    pub fn history_range(&self) -> Option<TimeWindow> {
        let start = self.history_start_instant();
        let end = self.window_length.advance(start, self.window_count)?
            - crate::domain::window::window_resolution();
        TimeWindow::new(start, end).ok()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            history_start: default_history_start(),
            window_length: default_window_length(),
            window_count: default_window_count(),
            output_dir: default_output_dir(),
            write_incomplete_windows: true,
            verbose: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.gong.io".to_string()
}

fn default_transcript_path() -> String {
    "/v2/calls/transcript".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_credentials_file() -> String {
    ".gong/credentials.json".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 9, 1).unwrap_or_default()
}

fn default_window_length() -> WindowLength {
    WindowLength::Months(3)
}

fn default_window_count() -> u32 {
    1
}

fn default_output_dir() -> String {
    "transcripts".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
