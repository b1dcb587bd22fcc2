//! Translation API key storage in the platform keyring.
//!
//! The config may hold the key in plaintext or as a `keyring:<name>`
//! reference resolved through [`SecretStore`].

use keyring::Entry;
use thiserror::Error;
use tracing::{info, warn};

/// Service name for keyring entries
const SERVICE_NAME: &str = "bhasha";

/// Conventional name for the Sarvam API key entry.
pub const DEFAULT_SECRET_NAME: &str = "sarvam-api";

/// Prefix marking a config value as a keyring reference.
const KEYRING_PREFIX: &str = "keyring:";

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret '{0}' not found")]
    NotFound(String),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Secret cannot be empty")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Secret storage backed by the platform keyring.
pub struct SecretStore {
    service: String,
}

impl SecretStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, name: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, name).map_err(|e| SecretError::Keyring(e.to_string()))
    }

    /// Store a secret in the keyring.
    pub fn set(&self, name: &str, value: &str) -> Result<(), SecretError> {
        if value.is_empty() {
            return Err(SecretError::Empty);
        }
        self.entry(name)?
            .set_password(value)
            .map_err(|e| SecretError::Keyring(e.to_string()))?;
        info!("Secret '{}' stored in keyring", name);
        Ok(())
    }

    /// Retrieve a secret from the keyring.
    pub fn get(&self, name: &str) -> Result<String, SecretError> {
        match self.entry(name)?.get_password() {
            Ok(password) => Ok(password),
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound(name.to_string())),
            Err(e) => Err(SecretError::Keyring(e.to_string())),
        }
    }

    /// Delete a secret from the keyring.
    pub fn delete(&self, name: &str) -> Result<(), SecretError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) => {
                info!("Secret '{}' deleted from keyring", name);
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Err(SecretError::NotFound(name.to_string())),
            Err(e) => Err(SecretError::Keyring(e.to_string())),
        }
    }

    /// Check if the keyring is available on this system.
    pub fn is_available() -> bool {
        Entry::new(SERVICE_NAME, "__availability_check__").is_ok()
    }
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a config value that may be a `keyring:<name>` reference.
///
/// Plaintext values are returned as-is with a warning.
pub fn resolve_secret(value: &str, store: &SecretStore) -> Result<String, SecretError> {
    if let Some(name) = value.strip_prefix(KEYRING_PREFIX) {
        store.get(name)
    } else {
        warn!("API key stored in plaintext config. Consider 'keyring:{}'.", DEFAULT_SECRET_NAME);
        Ok(value.to_string())
    }
}

/// CLI handlers for `bhasha secret ...`.
pub mod cli {
    use super::*;

    /// Prompt for a key (hidden input) and store it.
    pub fn handle_set(name: &str) -> Result<(), SecretError> {
        let secret = rpassword::prompt_password("Enter API key: ")?;
        SecretStore::new().set(name, secret.trim())?;
        println!("Secret '{}' stored. Reference it as api_key = \"keyring:{}\".", name, name);
        Ok(())
    }

    pub fn handle_delete(name: &str) -> Result<(), SecretError> {
        SecretStore::new().delete(name)?;
        println!("Secret '{}' deleted.", name);
        Ok(())
    }

    /// Report whether the keyring is usable.
    pub fn handle_check() -> bool {
        let available = SecretStore::is_available();
        if available {
            println!("Keyring is available.");
        } else {
            eprintln!("Keyring is NOT available on this system.");
            eprintln!("Set the {} environment variable instead.", crate::config::API_KEY_ENV);
        }
        available
    }
}
