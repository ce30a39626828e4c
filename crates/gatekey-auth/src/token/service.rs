//! Session protocol: issue, verify, chain, revoke.
//!
//! A subject has at most one valid token lineage at a time. `issue` starts
//! a new lineage and implicitly revokes anything outstanding; `chain`
//! rotates the lineage, invalidating the token handed in; `revoke` ends it.
//!
//! Two callers chaining the same subject concurrently race: the last
//! registry write wins and the other caller's freshly minted token is
//! immediately stale. At most one winner per subject per instant.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use time::OffsetDateTime;
use tracing::debug;

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token::codec::{SessionClaims, TokenCodec};
use crate::token::keys::SigningKeys;
use crate::token::nonces::NonceRegistry;

/// Outcome of a token check.
///
/// `valid: false` with a populated `subject` means the token decoded but
/// is expired, superseded or revoked; decode failures surface as errors
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus {
    /// Whether the token is currently valid.
    pub valid: bool,
    /// The subject the token was minted for (empty for the empty token).
    pub subject: String,
}

/// Issues, verifies, chains and revokes session tokens.
pub struct TokenService {
    codec: TokenCodec,
    nonces: NonceRegistry,
    token_lifetime: i64,
    nonce_length: usize,
}

impl TokenService {
    /// Creates a service over the given signing material and configuration.
    #[must_use]
    pub fn new(keys: SigningKeys, config: &AuthConfig) -> Self {
        Self {
            codec: TokenCodec::new(keys),
            nonces: NonceRegistry::new(),
            token_lifetime: config.token_lifetime.as_secs() as i64,
            nonce_length: config.nonce_length,
        }
    }

    /// Issues a fresh token for `subject`, superseding any outstanding
    /// lineage for the same subject.
    ///
    /// # Errors
    /// Only [`AuthError::InternalSigning`]; there is no user-input failure
    /// path.
    pub fn issue(&self, subject: &str) -> AuthResult<String> {
        let uniq = self.rotate_nonce(subject);
        let token = self.codec.encode(subject, &uniq, self.expiry())?;
        debug!(subject, "session issued");
        Ok(token)
    }

    /// Checks a token.
    ///
    /// A structurally sound token that is expired, superseded or revoked
    /// comes back as `valid: false` with no error; only decode failures
    /// are errors.
    ///
    /// # Errors
    /// [`AuthError::MalformedToken`] or [`AuthError::BadSignature`] from
    /// decoding.
    pub fn verify(&self, token: &str) -> AuthResult<TokenStatus> {
        // Cookie-based callers clear a session by storing the empty
        // string; that is "not connected", not a malformed token.
        if token.is_empty() {
            return Ok(TokenStatus {
                valid: false,
                subject: String::new(),
            });
        }

        let claims = self.codec.decode(token)?;
        Ok(TokenStatus {
            valid: self.is_current(&claims),
            subject: claims.subject,
        })
    }

    /// Exchanges a valid token for a successor with a refreshed expiry,
    /// invalidating the one handed in (and any other outstanding token
    /// for the subject).
    ///
    /// # Errors
    /// Decode errors pass through; a decodable but no-longer-valid token
    /// fails with [`AuthError::ExpiredOrStale`].
    pub fn chain(&self, token: &str) -> AuthResult<String> {
        let claims = self.codec.decode(token)?;
        if !self.is_current(&claims) {
            return Err(AuthError::ExpiredOrStale);
        }

        let uniq = self.rotate_nonce(&claims.subject);
        let token = self.codec.encode(&claims.subject, &uniq, self.expiry())?;
        debug!(subject = %claims.subject, "session chained");
        Ok(token)
    }

    /// Ends the subject's lineage, invalidating every outstanding token.
    /// Revoking a subject with no lineage is a no-op.
    pub fn revoke(&self, subject: &str) {
        self.nonces.clear(subject);
        debug!(subject, "session revoked");
    }

    fn expiry(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp() + self.token_lifetime
    }

    fn is_current(&self, claims: &SessionClaims) -> bool {
        let unexpired = claims.date > OffsetDateTime::now_utc().unix_timestamp();
        // The nonce comparison runs even for expired tokens.
        let nonce_ok = self.nonces.matches(&claims.subject, &claims.uniq);
        unexpired && nonce_ok
    }

    fn rotate_nonce(&self, subject: &str) -> String {
        let uniq = generate_nonce(self.nonce_length);
        self.nonces.put(subject, &uniq);
        uniq
    }
}

/// Generates `length` bytes of randomness, base64url-encoded.
fn generate_nonce(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill(bytes.as_mut_slice());
    URL_SAFE_NO_PAD.encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        let config = AuthConfig::default();
        TokenService::new(SigningKeys::from_hmac_secret(b"service-test-secret"), &config)
    }

    #[test]
    fn test_issued_token_is_valid() {
        let tokens = service();
        let token = tokens.issue("u1").unwrap();

        let status = tokens.verify(&token).unwrap();
        assert!(status.valid);
        assert_eq!(status.subject, "u1");
    }

    #[test]
    fn test_empty_token_is_not_connected() {
        let tokens = service();
        let status = tokens.verify("").unwrap();
        assert!(!status.valid);
        assert_eq!(status.subject, "");
    }

    #[test]
    fn test_issue_supersedes_previous_lineage() {
        let tokens = service();
        let first = tokens.issue("u1").unwrap();
        let second = tokens.issue("u1").unwrap();

        assert!(!tokens.verify(&first).unwrap().valid);
        assert!(tokens.verify(&second).unwrap().valid);
    }

    #[test]
    fn test_chain_invalidates_predecessor() {
        let tokens = service();
        let first = tokens.issue("u1").unwrap();
        let second = tokens.chain(&first).unwrap();
        assert_ne!(first, second);

        assert!(!tokens.verify(&first).unwrap().valid);

        let status = tokens.verify(&second).unwrap();
        assert!(status.valid);
        assert_eq!(status.subject, "u1");
    }

    #[test]
    fn test_chain_of_stale_token_fails() {
        let tokens = service();
        let first = tokens.issue("u1").unwrap();
        let _second = tokens.chain(&first).unwrap();

        assert!(matches!(
            tokens.chain(&first),
            Err(AuthError::ExpiredOrStale)
        ));
    }

    #[test]
    fn test_revoke_invalidates_without_error() {
        let tokens = service();
        let token = tokens.issue("u1").unwrap();
        tokens.revoke("u1");

        let status = tokens.verify(&token).unwrap();
        assert!(!status.valid);
        assert_eq!(status.subject, "u1");
    }

    #[test]
    fn test_revoke_unknown_subject_is_noop() {
        let tokens = service();
        tokens.revoke("nobody");
    }

    #[test]
    fn test_chain_of_revoked_token_fails() {
        let tokens = service();
        let token = tokens.issue("u1").unwrap();
        tokens.revoke("u1");
        assert!(matches!(
            tokens.chain(&token),
            Err(AuthError::ExpiredOrStale)
        ));
    }

    #[test]
    fn test_expired_token_is_invalid_but_decodes() {
        let mut config = AuthConfig::default();
        config.token_lifetime = std::time::Duration::from_secs(0);
        let tokens =
            TokenService::new(SigningKeys::from_hmac_secret(b"service-test-secret"), &config);

        // With a zero lifetime the date claim is never in the future.
        let token = tokens.issue("u1").unwrap();
        let status = tokens.verify(&token).unwrap();
        assert!(!status.valid);
        assert_eq!(status.subject, "u1");
    }

    #[test]
    fn test_subjects_do_not_interfere() {
        let tokens = service();
        let t1 = tokens.issue("u1").unwrap();
        let t2 = tokens.issue("u2").unwrap();

        tokens.revoke("u1");
        assert!(!tokens.verify(&t1).unwrap().valid);
        assert!(tokens.verify(&t2).unwrap().valid);
    }

    #[test]
    fn test_nonce_length_matches_config() {
        // 32 random bytes base64url-encode to 43 characters.
        assert_eq!(generate_nonce(32).len(), 43);
        assert_ne!(generate_nonce(32), generate_nonce(32));
    }
}
