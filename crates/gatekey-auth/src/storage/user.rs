//! User record and storage trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::AuthResult;

/// An account record.
///
/// The `id` is the token subject: stable and immutable for the account's
/// lifetime, unlike the name or email. The session core references it and
/// never mutates the record beyond the [`UserStorage`] surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier, used as the token subject.
    pub id: String,

    /// Unique display name, usable as a login.
    pub name: String,

    /// Unique email address, usable as a login.
    pub email: String,

    /// Argon2id PHC hash of the password.
    pub password_hash: String,

    /// Whether email ownership has been proven.
    pub verified: bool,

    /// When the account was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Creates an unverified account with a fresh UUID identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            verified: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Storage operations the protocols require from a user backend.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Persists a new account.
    ///
    /// # Errors
    /// `Conflict` when the name or email is already taken; `Storage` when
    /// the backend fails.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Looks up an account by name or email.
    ///
    /// Returns `None` when no account matches.
    ///
    /// # Errors
    /// `Storage` when the backend fails.
    async fn find_by_login(&self, login: &str) -> AuthResult<Option<User>>;

    /// Records that the subject proved ownership of their email address.
    ///
    /// # Errors
    /// `NotFound` when the subject does not exist; `Storage` when the
    /// backend fails.
    async fn mark_verified(&self, subject: &str) -> AuthResult<()>;

    /// Removes the account.
    ///
    /// # Errors
    /// `NotFound` when the subject does not exist; `Storage` when the
    /// backend fails.
    async fn delete(&self, subject: &str) -> AuthResult<()>;
}
