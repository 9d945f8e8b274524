//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers exchanged with the transcript API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Call identifier newtype wrapper
///
/// Opaque identifier the API assigns to each recorded call.
///
/// # Examples
///
/// ```
/// use gong_transcripts::domain::ids::CallId;
/// use std::str::FromStr;
///
/// let call_id = CallId::from_str("7782342274025937895").unwrap();
/// assert_eq!(call_id.as_str(), "7782342274025937895");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    /// Creates a new CallId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(CallId)` if the ID is non-empty, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Call ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the call ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CallId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CallId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Workspace identifier newtype wrapper
///
/// Numeric workspace id used to scope transcript searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(u64);

impl WorkspaceId {
    /// Creates a new WorkspaceId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid workspace ID '{s}': {e}"))
    }
}
