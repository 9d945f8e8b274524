//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "gong.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing transcript exporter configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your workspace and date range", self.output);
                println!("  2. Provide credentials, either:");
                println!("     - set GONG_CLIENT_ID and GONG_CLIENT_SECRET (or use a .env file)");
                println!("     - run: gong-transcripts login");
                println!("  3. Validate configuration: gong-transcripts validate-config");
                println!("  4. Run export: gong-transcripts export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration with every option and its default
    pub fn generate_config() -> &'static str {
        r#"# Call transcript exporter configuration

[application]
log_level = "info"    # trace | debug | info | warn | error
dry_run = false       # download and render, but write no files

[api]
base_url = "https://api.gong.io"
transcript_path = "/v2/calls/transcript"
# workspace_id = 2686967882418498600   # omit to search all workspaces
timeout_seconds = 60
# page_size_hint = 100

# Credentials: set both, or leave unset to use the credentials file / prompt
# client_id = "${GONG_CLIENT_ID}"
# client_secret = "${GONG_CLIENT_SECRET}"
credentials_file = ".gong/credentials.json"
interactive = true

[api.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[export]
history_start = "2021-09-01"     # must be the first day of a period
window_length = "3 months"       # e.g. "1 month", "3 months", "10 days"
window_count = 1
output_dir = "transcripts"
write_incomplete_windows = true
verbose = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"         # daily | hourly | never
"#
    }
}
