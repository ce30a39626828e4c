//! In-memory user storage backend.
//!
//! Backs development profiles and tests. Records live for the process
//! lifetime only; deployments wanting durable accounts swap in a real
//! backend behind the same [`UserStorage`] trait.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use gatekey_auth::{AuthError, AuthResult, User, UserStorage};

/// In-memory [`UserStorage`] with uniqueness on name and email.
#[derive(Debug, Default)]
pub struct MemoryUserStorage {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// id -> record
    users: HashMap<String, User>,
    /// name -> id
    by_name: HashMap<String, String>,
    /// email -> id
    by_email: HashMap<String, String>,
}

impl MemoryUserStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().users.len()
    }

    /// Returns `true` when no accounts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().users.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStorage for MemoryUserStorage {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.write();
        if inner.by_name.contains_key(&user.name) {
            return Err(AuthError::conflict(format!(
                "name '{}' is already taken",
                user.name
            )));
        }
        if inner.by_email.contains_key(&user.email) {
            return Err(AuthError::conflict(format!(
                "email '{}' is already taken",
                user.email
            )));
        }
        inner.by_name.insert(user.name.clone(), user.id.clone());
        inner.by_email.insert(user.email.clone(), user.id.clone());
        inner.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_login(&self, login: &str) -> AuthResult<Option<User>> {
        let inner = self.read();
        let id = inner
            .by_name
            .get(login)
            .or_else(|| inner.by_email.get(login));
        Ok(id.and_then(|id| inner.users.get(id)).cloned())
    }

    async fn mark_verified(&self, subject: &str) -> AuthResult<()> {
        let mut inner = self.write();
        match inner.users.get_mut(subject) {
            Some(user) => {
                user.verified = true;
                Ok(())
            }
            None => Err(AuthError::not_found(format!("no user '{subject}'"))),
        }
    }

    async fn delete(&self, subject: &str) -> AuthResult<()> {
        let mut inner = self.write();
        match inner.users.remove(subject) {
            Some(user) => {
                inner.by_name.remove(&user.name);
                inner.by_email.remove(&user.email);
                Ok(())
            }
            None => Err(AuthError::not_found(format!("no user '{subject}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User::new(name, email, "$argon2id$fake-hash")
    }

    #[tokio::test]
    async fn test_create_and_find_by_name_or_email() {
        let store = MemoryUserStorage::new();
        let alice = user("alice", "alice@example.com");
        store.create(&alice).await.unwrap();

        let by_name = store.find_by_login("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, alice.id);

        let by_email = store
            .find_by_login("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, alice.id);

        assert!(store.find_by_login("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = MemoryUserStorage::new();
        store.create(&user("alice", "a1@example.com")).await.unwrap();

        let err = store
            .create(&user("alice", "a2@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryUserStorage::new();
        store.create(&user("alice", "a@example.com")).await.unwrap();

        let err = store.create(&user("bob", "a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_mark_verified() {
        let store = MemoryUserStorage::new();
        let alice = user("alice", "alice@example.com");
        store.create(&alice).await.unwrap();

        store.mark_verified(&alice.id).await.unwrap();
        let found = store.find_by_login("alice").await.unwrap().unwrap();
        assert!(found.verified);

        let err = store.mark_verified("missing").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_frees_name_and_email() {
        let store = MemoryUserStorage::new();
        let alice = user("alice", "alice@example.com");
        store.create(&alice).await.unwrap();

        store.delete(&alice.id).await.unwrap();
        assert!(store.is_empty());
        assert!(store.find_by_login("alice").await.unwrap().is_none());

        // The freed identifiers are reusable.
        store.create(&user("alice", "alice@example.com")).await.unwrap();

        let err = store.delete(&alice.id).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));
    }
}
