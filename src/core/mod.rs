//! Core export engine.
//!
//! # Modules
//!
//! - [`plan`] - Splits the history into contiguous calendar windows
//! - [`paginate`] - Drains one window through cursor pagination
//! - [`render`] - Flattens call transcripts into text
//! - [`export`] - Orchestrates the run and reports a summary
//!
//! # Export Workflow
//!
//! 1. **Plan**: compute `window_count` windows from `history_start`
//! 2. **Paginate**: fetch pages for a window until no cursor is returned
//! 3. **Verify**: cross-check the record count with the declared total
//! 4. **Render**: deduplicate and flatten calls into text
//! 5. **Write**: store `<period>.txt` in the output directory
//! 6. **Report**: summarise every window and derive the exit code
//!
//! # Example
//!
//! ```rust,no_run
//! use gong_transcripts::config::load_config;
//! use gong_transcripts::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gong.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = ExportCoordinator::from_config(config, shutdown_rx)?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Windows: {}", summary.windows_attempted());
//! println!("Records: {}", summary.total_records);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod paginate;
pub mod plan;
pub mod render;
