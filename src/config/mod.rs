//! Configuration management for the transcript exporter.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GONG_*` environment overrides applied after parsing
//! - Default values for every setting
//! - Validation before any network activity
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gong_transcripts::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gong.toml")?;
//!
//! println!("Endpoint: {}", config.api.transcript_url());
//! println!(
//!     "{} window(s) of {} from {}",
//!     config.export.window_count, config.export.window_length, config.export.history_start
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`ApiConfig`] - Endpoint, workspace, credentials, timeout and [`RetryConfig`]
//! - [`ExportConfig`] - History start, window length/count and output directory
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! workspace_id = 2686967882418498600
//! client_id = "${GONG_CLIENT_ID}"
//! client_secret = "${GONG_CLIENT_SECRET}"
//! page_size_hint = 100
//!
//! [export]
//! history_start = "2021-09-01"
//! window_length = "1 month"
//! window_count = 3
//! output_dir = "transcripts"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApiConfig, AppConfig, ApplicationConfig, ExportConfig, LoggingConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
