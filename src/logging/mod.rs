//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use gong_transcripts::logging::init_logging;
//! use gong_transcripts::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use gong_transcripts::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Request timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying page request"
        );
    };
}

/// Log the completion of one window
///
/// # Example
///
/// ```no_run
/// use gong_transcripts::log_window_complete;
/// use std::time::Duration;
///
/// log_window_complete!("2021-09", 237, 3, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_window_complete {
    ($label:expr, $records:expr, $pages:expr, $duration:expr) => {
        tracing::info!(
            window = %$label,
            records = $records,
            pages = $pages,
            duration_ms = $duration.as_millis() as u64,
            "Window downloaded"
        );
    };
}
