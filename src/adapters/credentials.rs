//! API credential resolution
//!
//! [`CredentialStore`] is a two-state machine. While `Unset` it looks for a
//! configured pair, then a credentials file written by an earlier login, and
//! finally asks a [`Prompter`]. A prompted pair is persisted before the store
//! moves to `Stored`; every later call returns the stored pair without I/O.

use crate::config::{secret_string, ApiConfig, SecretString};
use crate::domain::{Result, TranscriptError};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// API client id and secret used for HTTP basic authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: secret_string(client_secret.into()),
        }
    }

    fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.expose_secret().is_empty()
    }
}

/// Source of API credentials for a run
pub trait CredentialProvider: Send + Sync {
    /// Returns the credential pair, acquiring it on first use if necessary
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::CredentialUnavailable`] when nothing is
    /// stored and none was supplied interactively.
    fn get_credentials(&self) -> Result<Credentials>;
}

/// Interactive input used when no credentials are stored
pub trait Prompter: Send + Sync {
    /// Asks for a single value; `None` means the user declined
    fn prompt(&self, label: &str, sensitive: bool) -> io::Result<Option<String>>;
}

/// Reads answers from stdin
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&self, label: &str, sensitive: bool) -> io::Result<Option<String>> {
        if sensitive {
            eprintln!("Note: input will be visible while typing");
        }
        print!("{label}: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        let value = input.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }
}

enum CredentialState {
    Unset,
    Stored(Credentials),
}

/// Credential resolver backed by configuration, a JSON file and a prompter
pub struct CredentialStore {
    configured: Option<Credentials>,
    credentials_file: PathBuf,
    prompter: Option<Box<dyn Prompter>>,
    state: Mutex<CredentialState>,
}

impl CredentialStore {
    /// Creates a store from the API configuration
    ///
    /// Prompting is enabled when `api.interactive` is set.
    pub fn from_config(config: &ApiConfig) -> Self {
        let configured = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => Some(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        };

        let prompter: Option<Box<dyn Prompter>> = if config.interactive {
            Some(Box::new(StdinPrompter))
        } else {
            None
        };

        Self {
            configured: configured.filter(Credentials::is_complete),
            credentials_file: PathBuf::from(&config.credentials_file),
            prompter,
            state: Mutex::new(CredentialState::Unset),
        }
    }

    /// Creates a store that only consults `credentials_file` and `prompter`
    pub fn new(credentials_file: impl Into<PathBuf>, prompter: Option<Box<dyn Prompter>>) -> Self {
        Self {
            configured: None,
            credentials_file: credentials_file.into(),
            prompter,
            state: Mutex::new(CredentialState::Unset),
        }
    }

    /// Path of the credentials file
    pub fn credentials_file(&self) -> &Path {
        &self.credentials_file
    }

    /// Prompts for a new pair and persists it, replacing any stored pair
    pub fn login(&self) -> Result<Credentials> {
        let credentials = self.prompt_for_credentials()?;
        persist(&self.credentials_file, &credentials)?;
        self.store(credentials.clone())?;
        Ok(credentials)
    }

    fn resolve(&self) -> Result<Credentials> {
        if let Some(credentials) = &self.configured {
            tracing::debug!("Using credentials from configuration");
            return Ok(credentials.clone());
        }

        if let Some(credentials) = load(&self.credentials_file)? {
            tracing::debug!(
                path = %self.credentials_file.display(),
                "Using stored credentials"
            );
            return Ok(credentials);
        }

        let credentials = self.prompt_for_credentials()?;
        persist(&self.credentials_file, &credentials)?;
        Ok(credentials)
    }

    fn prompt_for_credentials(&self) -> Result<Credentials> {
        let prompter = self.prompter.as_ref().ok_or_else(|| {
            TranscriptError::CredentialUnavailable(format!(
                "no credentials configured or stored at {} and prompting is disabled",
                self.credentials_file.display()
            ))
        })?;

        let declined =
            || TranscriptError::CredentialUnavailable("no credentials entered".to_string());
        let client_id = prompter
            .prompt("Enter id", false)
            .map_err(|e| TranscriptError::Io(e.to_string()))?
            .ok_or_else(declined)?;
        let client_secret = prompter
            .prompt("Enter secret", true)
            .map_err(|e| TranscriptError::Io(e.to_string()))?
            .ok_or_else(declined)?;

        Ok(Credentials::new(client_id, client_secret))
    }

    fn store(&self, credentials: Credentials) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| TranscriptError::Other("credential state lock poisoned".to_string()))?;
        *state = CredentialState::Stored(credentials);
        Ok(())
    }
}

impl CredentialProvider for CredentialStore {
    fn get_credentials(&self) -> Result<Credentials> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| TranscriptError::Other("credential state lock poisoned".to_string()))?;

        match &*state {
            CredentialState::Stored(credentials) => Ok(credentials.clone()),
            CredentialState::Unset => {
                let credentials = self.resolve()?;
                *state = CredentialState::Stored(credentials.clone());
                Ok(credentials)
            }
        }
    }
}

fn load(path: &Path) -> Result<Option<Credentials>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        TranscriptError::CredentialUnavailable(format!(
            "failed to read {}: {e}",
            path.display()
        ))
    })?;
    let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
        TranscriptError::CredentialUnavailable(format!(
            "invalid credentials file {}: {e}",
            path.display()
        ))
    })?;

    Ok(credentials.is_complete().then_some(credentials))
}

fn persist(path: &Path, credentials: &Credentials) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(credentials)?;
    std::fs::write(path, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!(path = %path.display(), "Saved credentials");
    Ok(())
}
