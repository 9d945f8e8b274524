//! Login command implementation
//!
//! Prompts for an API client id and secret and stores them in the configured
//! credentials file for later runs.

use crate::adapters::credentials::{CredentialStore, StdinPrompter};
use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Store credentials in this file instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub credentials_file: Option<String>,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let path = self
            .credentials_file
            .clone()
            .unwrap_or(config.api.credentials_file);

        println!("🔑 Enter the API access key and secret");
        let store = CredentialStore::new(&path, Some(Box::new(StdinPrompter)));
        match store.login() {
            Ok(credentials) => {
                println!(
                    "✅ Credentials for '{}' saved to {}",
                    credentials.client_id,
                    store.credentials_file().display()
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                println!("❌ {e}");
                Ok(2)
            }
        }
    }
}
