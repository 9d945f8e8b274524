// Gong Transcripts - bulk call transcript exporter
// Copyright (c) 2025 Gong Transcripts Contributors
// Licensed under the MIT License

//! # Gong Transcripts
//!
//! Bulk exporter for a call-transcription API. It authenticates once, walks a
//! bounded history window by window, drains each window through cursor
//! pagination and writes the transcripts of every window to a text file.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Window planning, pagination, rendering and orchestration
//! - [`adapters`] - Transcript API client and credential store
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gong_transcripts::config::load_config_or_default;
//! use gong_transcripts::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("gong.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::from_config(config, shutdown_rx)?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} transcripts", summary.total_records);
//!     std::process::exit(summary.exit_code());
//! }
//! ```
//!
//! ## Windows
//!
//! The history starts at `export.history_start`, which must open a period of
//! `export.window_length`. Windows are contiguous: each ends one second before
//! the next begins, and month arithmetic is calendar exact.
//!
//! ```rust
//! use gong_transcripts::core::plan::DateWindowPlanner;
//! use gong_transcripts::domain::WindowLength;
//! use chrono::{TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap();
//! let planner = DateWindowPlanner::new(start, WindowLength::Months(1), 3).unwrap();
//! let labels: Vec<_> = planner.windows().map(|w| w.label).collect();
//! assert_eq!(labels, ["2021-09", "2021-10", "2021-11"]);
//! ```
//!
//! ## Error Handling
//!
//! [`domain::TranscriptError`] is the crate-wide error; page and window
//! failures are [`domain::ApiError`] and [`domain::WindowError`]. Only
//! authentication failures stop a run; other window failures are recorded in
//! the [`core::export::ExportSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
