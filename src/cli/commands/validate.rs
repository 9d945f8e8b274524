//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration, validates it and prints the planned windows.

use crate::config::{load_config_or_default, AppConfig};
use crate::core::plan::DateWindowPlanner;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        if !Path::new(config_path).exists() {
            println!("ℹ️  {config_path} not found, checking defaults and environment");
        }

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let planner = match DateWindowPlanner::from_config(&config.export) {
            Ok(p) => p,
            Err(e) => {
                println!("❌ Window plan is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        print_summary(&config);

        println!("Planned windows:");
        for planned in planner.windows() {
            println!(
                "  {:>3}. {:<10} {}  -> {}.txt",
                planned.index + 1,
                planned.label,
                planned.window,
                planned.label
            );
        }
        println!();

        Ok(0)
    }
}

fn print_summary(config: &AppConfig) {
    let credentials = if config.api.client_id.is_some() {
        "configured".to_string()
    } else if Path::new(&config.api.credentials_file).exists() {
        format!("stored in {}", config.api.credentials_file)
    } else if config.api.interactive {
        "prompt on first use".to_string()
    } else {
        "missing".to_string()
    };

    println!();
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Endpoint: {}", config.api.transcript_url());
    println!(
        "  Workspace: {}",
        config
            .api
            .workspace_id
            .map_or_else(|| "all".to_string(), |w| w.to_string())
    );
    println!("  Credentials: {credentials}");
    println!("  Timeout: {}s", config.api.timeout_seconds);
    println!("  Max Retries: {}", config.api.retry.max_retries);
    println!("  History Start: {}", config.export.history_start);
    println!("  Window Length: {}", config.export.window_length);
    println!("  Window Count: {}", config.export.window_count);
    println!("  Output Directory: {}", config.export.output_dir);
    println!("  Dry Run: {}", config.application.dry_run);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_rejects_misaligned_start() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[export]\nhistory_start = \"2021-09-15\"\nwindow_length = \"1 month\""
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[export]\nhistory_start = \"2021-09-01\"\nwindow_length = \"1 month\"\n\
             window_count = 3"
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
