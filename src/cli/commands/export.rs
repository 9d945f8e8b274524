//! Export command implementation
//!
//! This module implements the `export` command, which downloads every window
//! of the configured history and writes one text file per window.

use crate::config::{load_config_or_default, AppConfig};
use crate::core::export::ExportCoordinator;
use crate::domain::ids::WorkspaceId;
use crate::domain::{ErrorKind, WindowLength};
use chrono::NaiveDate;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// First day of the first window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Window length, e.g. "1 month", "3 months", "10 days"
    #[arg(long, value_name = "LENGTH")]
    pub window_length: Option<WindowLength>,

    /// Number of consecutive windows to export
    #[arg(long, value_name = "N")]
    pub window_count: Option<u32>,

    /// Directory receiving the transcript files
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Workspace to export (overrides config and WORKSPACE_ID)
    #[arg(long, value_name = "ID")]
    pub workspace_id: Option<WorkspaceId>,

    /// Download and render but do not write any files
    #[arg(long)]
    pub dry_run: bool,

    /// Report every downloaded page
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(start) = self.start {
            tracing::info!(start = %start, "Overriding history start from CLI");
            config.export.history_start = start;
        }
        if let Some(length) = self.window_length {
            tracing::info!(window_length = %length, "Overriding window length from CLI");
            config.export.window_length = length;
        }
        if let Some(count) = self.window_count {
            config.export.window_count = count;
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
        if let Some(workspace_id) = self.workspace_id {
            config.api.workspace_id = Some(workspace_id);
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if self.verbose {
            config.export.verbose = true;
        }
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.application.dry_run;
        let output_dir = config.export.output_dir.clone();

        let coordinator = match ExportCoordinator::from_config(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        if dry_run {
            println!("🔍 DRY RUN MODE - no files will be written");
            println!();
        }

        let planner = coordinator.planner();
        println!(
            "🚀 Exporting {} window(s) of {} into {}",
            planner.count(),
            planner.window_length(),
            output_dir
        );
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(match e.kind() {
                    ErrorKind::CredentialUnavailable | ErrorKind::InvalidConfiguration => 2,
                    _ => 5,
                });
            }
        };

        println!();
        println!("📊 Export Summary:");
        print!("{}", summary.render_table());
        println!(
            "  Windows: {} of {} attempted",
            summary.windows_attempted(),
            summary.windows_planned
        );
        println!("  Records downloaded: {}", summary.total_records);
        println!("  Duplicates skipped: {}", summary.duplicates_skipped);
        println!("  Files written: {}", summary.files_written());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let exit_code = summary.exit_code();
        match exit_code {
            130 => println!("⚠️  Export interrupted before all windows were downloaded"),
            3 => println!(
                "❌ Export aborted: {}",
                summary.aborted.as_deref().unwrap_or("authentication failed")
            ),
            1 => println!("⚠️  Export completed with failed windows"),
            _ => println!("✅ Export completed successfully!"),
        }

        Ok(exit_code)
    }
}
