//! External system integrations.
//!
//! - [`gong`] - Transcript search API (page fetcher, wire models)
//! - [`credentials`] - API credential resolution and persistence
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`gong::TranscriptSource`], [`credentials::CredentialProvider`]) so the
//! export engine can be tested with scripted implementations.
//!
//! ```rust,no_run
//! use gong_transcripts::adapters::credentials::{CredentialProvider, CredentialStore};
//! use gong_transcripts::adapters::gong::GongClient;
//! use gong_transcripts::config::ApiConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::default();
//! let client = GongClient::new(&config)?;
//! let credentials = CredentialStore::from_config(&config).get_credentials()?;
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod gong;
