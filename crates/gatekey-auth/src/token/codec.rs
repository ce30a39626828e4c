//! Session token encoding and decoding.
//!
//! Tokens are standard three-segment signed tokens (base64url JSON header,
//! payload and signature) carrying exactly three claims: `subject`, `uniq`
//! and `date`. Decoding verifies structure and signature only; whether the
//! token is *currently* valid (unexpired, nonce still live) is the
//! caller's concern. Keeping that split lets callers distinguish a
//! malformed request from a lapsed session.

use std::collections::HashSet;

use jsonwebtoken::{Header, Validation, decode, decode_header, encode};
use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::error::AuthError;
use crate::token::keys::{AlgorithmFamily, SigningKeys};

/// The claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Stable identifier of the authenticated principal.
    pub subject: String,

    /// One-time value tying the token to its lineage in the nonce registry.
    pub uniq: String,

    /// Absolute expiry, in seconds since the Unix epoch.
    pub date: i64,
}

/// Encodes and decodes signed session tokens.
pub struct TokenCodec {
    keys: SigningKeys,
}

impl TokenCodec {
    /// Creates a codec over the given signing material.
    #[must_use]
    pub fn new(keys: SigningKeys) -> Self {
        Self { keys }
    }

    /// The signing material this codec signs and verifies with.
    #[must_use]
    pub fn keys(&self) -> &SigningKeys {
        &self.keys
    }

    /// Signs a token for the given subject, nonce and expiry.
    ///
    /// # Errors
    /// Returns [`AuthError::InternalSigning`] if the signing operation
    /// itself fails.
    pub fn encode(&self, subject: &str, uniq: &str, date: i64) -> AuthResult<String> {
        let claims = SessionClaims {
            subject: subject.to_owned(),
            uniq: uniq.to_owned(),
            date,
        };
        let header = Header::new(self.keys.algorithm());
        encode(&header, &claims, self.keys.encoding_key())
            .map_err(|e| AuthError::internal_signing(e.to_string()))
    }

    /// Verifies structure and signature, returning the claims.
    ///
    /// Expiry and nonce currency are deliberately not checked here.
    ///
    /// # Errors
    /// - [`AuthError::MalformedToken`] if the string is not a well-formed
    ///   signed token
    /// - [`AuthError::BadSignature`] if the signature does not verify, or
    ///   the header declares an algorithm family other than the configured
    ///   one
    pub fn decode(&self, token: &str) -> AuthResult<SessionClaims> {
        let header = decode_header(token).map_err(decode_error)?;
        let claimed = AlgorithmFamily::of(header.alg).ok_or(AuthError::BadSignature)?;
        let key = self.keys.decoding_key(claimed)?;

        // The date claim is checked by the caller, not here; nothing in
        // the standard claim set is required.
        let mut validation = Validation::new(self.keys.algorithm());
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<SessionClaims>(token, key, &validation).map_err(decode_error)?;
        Ok(data.claims)
    }
}

/// Maps library failures onto the structural/signature split.
fn decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => AuthError::BadSignature,
        _ => AuthError::MalformedToken,
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    fn hmac_codec() -> TokenCodec {
        TokenCodec::new(SigningKeys::from_hmac_secret(b"codec-test-secret"))
    }

    #[test]
    fn test_round_trip() {
        let codec = hmac_codec();
        let token = codec.encode("u1", "nonce-1", 1_700_000_000).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.subject, "u1");
        assert_eq!(claims.uniq, "nonce-1");
        assert_eq!(claims.date, 1_700_000_000);
    }

    #[test]
    fn test_expired_token_still_decodes() {
        // Currency is the caller's concern; the codec only vouches for
        // structure and signature.
        let codec = hmac_codec();
        let token = codec.encode("u1", "nonce-1", 0).unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.date, 0);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = hmac_codec();
        assert!(matches!(
            codec.decode("definitely not a token"),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(codec.decode(""), Err(AuthError::MalformedToken)));
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let codec = hmac_codec();
        let token = codec.encode("u1", "nonce-1", 1_700_000_000).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        let payload = &mut parts[1];
        let original = payload.remove(0);
        payload.insert(0, if original == 'A' { 'B' } else { 'A' });
        let tampered = parts.join(".");

        assert!(matches!(
            codec.decode(&tampered),
            Err(AuthError::BadSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let codec = hmac_codec();
        let other = TokenCodec::new(SigningKeys::from_hmac_secret(b"a different secret"));
        let token = codec.encode("u1", "nonce-1", 1_700_000_000).unwrap();
        assert!(matches!(other.decode(&token), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_foreign_family_header_is_bad_signature() {
        // A token declaring ES256 against an HMAC-configured codec is
        // rejected before any signature inspection.
        let codec = hmac_codec();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"ES256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(br#"{"subject":"u1","uniq":"n","date":1700000000}"#);
        let forged = format!("{header}.{payload}.AAAA");

        assert!(matches!(codec.decode(&forged), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_unsupported_family_header_is_bad_signature() {
        let codec = hmac_codec();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(br#"{"subject":"u1","uniq":"n","date":1700000000}"#);
        let forged = format!("{header}.{payload}.AAAA");

        assert!(matches!(codec.decode(&forged), Err(AuthError::BadSignature)));
    }

    #[test]
    fn test_missing_claims_is_malformed() {
        // Signed correctly but not carrying the session claim set.
        let codec = hmac_codec();
        let header = Header::new(codec.keys().algorithm());

        #[derive(Serialize)]
        struct Other {
            sub: String,
        }
        let token = encode(
            &header,
            &Other {
                sub: "u1".to_owned(),
            },
            codec.keys().encoding_key(),
        )
        .unwrap();

        assert!(matches!(
            codec.decode(&token),
            Err(AuthError::MalformedToken)
        ));
    }
}
