//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id (default parameters, random salt)
//! and stored as PHC strings. Verification compares against the stored
//! hash; a mismatch is a normal `false`, while an unparseable stored hash
//! is an internal fault.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthResult;
use crate::error::AuthError;

/// Hashes a password for storage.
///
/// # Errors
/// Returns [`AuthError::Internal`] if hashing fails (rare).
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::internal(format!("password hashing: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch.
///
/// # Errors
/// Returns [`AuthError::Internal`] only when the stored hash itself does
/// not parse.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::internal(format!("stored password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupt_stored_hash_is_internal() {
        let err = verify_password("pw", "not a phc string").unwrap_err();
        assert!(matches!(err, AuthError::Internal { .. }));
    }
}
