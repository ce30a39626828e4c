//! Server configuration loading.
//!
//! Configuration is a single TOML file. The auth section is owned by
//! `gatekey-auth`; this module adds the listen address and mail transport
//! settings, reads the file, and resolves configured key material into
//! loaded [`SigningKeys`].
//!
//! # Example
//!
//! ```toml
//! [server]
//! listen = "127.0.0.1:7070"
//!
//! [auth]
//! token_lifetime = "1h"
//! nonce_length = 32
//! require_verification = true
//!
//! [auth.signing]
//! hmac_secret = "change-me"
//!
//! [mail]
//! smtp_host = "smtp.example.com"
//! smtp_port = 587
//! from = "noreply@example.com"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use gatekey_auth::config::SigningMaterial;
use gatekey_auth::{AuthConfig, AuthError, ConfigError, SigningKeys};
use serde::{Deserialize, Serialize};

/// Root configuration for the GateKey process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener settings.
    pub server: ListenConfig,

    /// Session and verification core settings.
    pub auth: AuthConfig,

    /// Outbound mail settings.
    pub mail: MailConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ListenConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 7070)),
        }
    }
}

/// Outbound mail transport settings.
///
/// All fields are optional; without them the process runs with the logging
/// mailer (see [`crate::mail::LogMailer`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: Option<String>,

    /// SMTP server port.
    pub smtp_port: Option<u16>,

    /// Sender address for verification mail.
    pub from: Option<String>,

    /// SMTP authentication password.
    pub password: Option<String>,
}

/// Errors that can occur while loading configuration and key material.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file did not parse as TOML.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed configuration violates an invariant.
    #[error(transparent)]
    Invalid(#[from] ConfigError),

    /// A configured key file could not be read.
    #[error("cannot read key file {path}: {source}")]
    ReadKey {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Key material was read but did not parse.
    #[error(transparent)]
    KeyLoad(#[from] AuthError),
}

/// Reads and validates the configuration file at `path`.
///
/// # Errors
/// Returns a [`ConfigLoadError`] for unreadable files, TOML parse
/// failures, or invariant violations.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let config: ServerConfig = toml::from_str(&raw)?;
    config.auth.validate()?;
    Ok(config)
}

/// Resolves the configured signing material into loaded keys.
///
/// Key material problems surface here, at startup, never at request time.
///
/// # Errors
/// Returns a [`ConfigLoadError`] for unreadable or unparseable key files.
pub fn load_signing_keys(config: &AuthConfig) -> Result<SigningKeys, ConfigLoadError> {
    match config.signing.material()? {
        SigningMaterial::Hmac(secret) => Ok(SigningKeys::from_hmac_secret(secret.as_bytes())),
        SigningMaterial::KeyPair { private, public } => {
            let private_pem = read_key(private)?;
            let public_pem = read_key(public)?;
            Ok(SigningKeys::from_ec_pem(&private_pem, &public_pem)?)
        }
    }
}

fn read_key(path: &Path) -> Result<Vec<u8>, ConfigLoadError> {
    std::fs::read(path).map_err(|source| ConfigLoadError::ReadKey {
        path: path.to_owned(),
        source,
    })
}
