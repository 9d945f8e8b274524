//! In-memory protection for the API client secret
//!
//! The client secret is wrapped in [`SecretString`] from the moment it is read
//! (config file, `GONG_CLIENT_SECRET`, credentials file or prompt) until the
//! client builds the `Authorization: Basic` header, which is the only place it
//! is exposed. The buffer is zeroized on drop and `Debug` output is redacted,
//! so configuration and credentials can be logged with `?` safely.
//!
//! ```rust
//! use gong_transcripts::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let client_secret = secret_string("api-secret".to_string());
//! let pair = format!("{}:{}", "ACCESS_KEY", client_secret.expose_secret());
//! assert_eq!(pair, "ACCESS_KEY:api-secret");
//! assert!(!format!("{client_secret:?}").contains("api-secret"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Secret text held inside a [`Secret`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

// The credentials file stores the pair in plain JSON
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl SecretValue {
    /// Blank secrets count as missing
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Client secret as carried by [`crate::config::ApiConfig`] and
/// [`crate::adapters::credentials::Credentials`]
pub type SecretString = Secret<SecretValue>;

#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
