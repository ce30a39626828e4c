//! Auth configuration types.
//!
//! Configuration resolves to exactly one signing family at startup: a
//! symmetric HMAC secret or an ECDSA key pair, never both and never
//! neither. Everything here is plain data; key files are read and parsed
//! by the process that owns startup (see `gatekey-server`).
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! token_lifetime = "1h"
//! nonce_length = 32
//! require_verification = true
//!
//! [auth.signing]
//! hmac_secret = "change-me"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum accepted nonce/ticket length, in bytes of randomness.
pub const MIN_NONCE_LENGTH: usize = 16;

/// Auth section of the service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// How long an issued token lives before its date claim lapses.
    #[serde(with = "humantime_serde")]
    pub token_lifetime: Duration,

    /// Bytes of randomness in each nonce and verification ticket.
    pub nonce_length: usize,

    /// Require proven email ownership before login.
    pub require_verification: bool,

    /// Signing material selection.
    pub signing: SigningConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_lifetime: Duration::from_secs(3600),
            nonce_length: 32,
            require_verification: true,
            signing: SigningConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validates the invariants that must hold before the service starts.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.signing.material()?;
        if self.nonce_length < MIN_NONCE_LENGTH {
            return Err(ConfigError::NonceLengthTooSmall {
                actual: self.nonce_length,
            });
        }
        if self.token_lifetime.is_zero() {
            return Err(ConfigError::ZeroTokenLifetime);
        }
        Ok(())
    }
}

/// Signing material: a symmetric secret or an asymmetric key pair.
///
/// Setting `hmac_secret` selects HS256 and disables the ECDSA path;
/// setting the key pair selects ES256 and disables HMAC.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// HMAC secret for HS256.
    pub hmac_secret: Option<String>,

    /// Path to the PEM-encoded ECDSA private key (PKCS#8).
    pub private_key_pem: Option<PathBuf>,

    /// Path to the PEM-encoded ECDSA public key.
    pub public_key_pem: Option<PathBuf>,
}

impl SigningConfig {
    /// Resolves the configured material to exactly one signing family.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when neither or both families are
    /// configured, or when the key pair is incomplete.
    pub fn material(&self) -> Result<SigningMaterial<'_>, ConfigError> {
        let key_pair = match (&self.private_key_pem, &self.public_key_pem) {
            (Some(private), Some(public)) => Some((private.as_path(), public.as_path())),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteKeyPair),
        };

        match (&self.hmac_secret, key_pair) {
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousSigningMaterial),
            (Some(secret), None) => Ok(SigningMaterial::Hmac(secret.as_str())),
            (None, Some((private, public))) => Ok(SigningMaterial::KeyPair { private, public }),
            (None, None) => Err(ConfigError::NoSigningMaterial),
        }
    }
}

/// The resolved signing material selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMaterial<'a> {
    /// Symmetric HMAC secret (HS256).
    Hmac(&'a str),
    /// Paths to the PEM-encoded ECDSA key pair (ES256).
    KeyPair {
        /// Private key path.
        private: &'a Path,
        /// Public key path.
        public: &'a Path,
    },
}

/// Errors detected while validating the auth configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither an HMAC secret nor a key pair is configured.
    #[error("signing material missing: configure hmac_secret or a key pair")]
    NoSigningMaterial,

    /// Both an HMAC secret and a key pair are configured.
    #[error("ambiguous signing material: hmac_secret and a key pair are both set")]
    AmbiguousSigningMaterial,

    /// Only one half of the key pair is configured.
    #[error("key pair incomplete: both private_key_pem and public_key_pem are required")]
    IncompleteKeyPair,

    /// The configured nonce length is below the accepted minimum.
    #[error("nonce_length {actual} is below the minimum of 16")]
    NonceLengthTooSmall {
        /// The configured value.
        actual: usize,
    },

    /// The token lifetime is zero.
    #[error("token_lifetime must be positive")]
    ZeroTokenLifetime,
}
