//! Signing key material and algorithm selection.
//!
//! GateKey signs session tokens with exactly one algorithm family, resolved
//! once at startup: HS256 from a shared secret, or ES256 from a PEM-encoded
//! key pair. The selection is immutable for the process lifetime.
//!
//! Verification material is only handed out for the configured family. A
//! token whose header declares any other family is rejected before its
//! signature is looked at; honoring the header's own algorithm would let
//! an attacker choose the verification path.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::error::AuthError;

/// The two supported signing families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    /// Symmetric, secret-based (HMAC).
    Hmac,
    /// Asymmetric, key-pair-based (ECDSA).
    Ecdsa,
}

impl AlgorithmFamily {
    /// Classifies a token header algorithm, if it belongs to a supported
    /// family.
    #[must_use]
    pub fn of(algorithm: Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Some(Self::Hmac),
            Algorithm::ES256 | Algorithm::ES384 => Some(Self::Ecdsa),
            _ => None,
        }
    }

    /// Returns the family name as a static string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hmac => "HMAC",
            Self::Ecdsa => "ECDSA",
        }
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Signing and verification material for the configured family.
pub struct SigningKeys {
    algorithm: Algorithm,
    family: AlgorithmFamily,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    /// Builds HS256 material from a shared secret.
    #[must_use]
    pub fn from_hmac_secret(secret: &[u8]) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            family: AlgorithmFamily::Hmac,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Builds ES256 material from PEM-encoded private and public keys.
    ///
    /// # Errors
    /// Returns [`AuthError::KeyLoad`] if either PEM blob does not parse.
    /// This is a startup-time failure; malformed keys never surface at
    /// request time.
    pub fn from_ec_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, AuthError> {
        let encoding = EncodingKey::from_ec_pem(private_pem)
            .map_err(|e| AuthError::key_load(format!("private key: {e}")))?;
        let decoding = DecodingKey::from_ec_pem(public_pem)
            .map_err(|e| AuthError::key_load(format!("public key: {e}")))?;
        Ok(Self {
            algorithm: Algorithm::ES256,
            family: AlgorithmFamily::Ecdsa,
            encoding,
            decoding,
        })
    }

    /// The active signing algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The active algorithm family.
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    /// Key used to sign outgoing tokens.
    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    /// Verification material for a token claiming the given family.
    ///
    /// # Errors
    /// Returns [`AuthError::BadSignature`] when the claimed family differs
    /// from the configured one.
    pub(crate) fn decoding_key(&self, claimed: AlgorithmFamily) -> Result<&DecodingKey, AuthError> {
        if claimed == self.family {
            Ok(&self.decoding)
        } else {
            Err(AuthError::BadSignature)
        }
    }
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("algorithm", &self.algorithm)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}
