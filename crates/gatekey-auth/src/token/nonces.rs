//! Per-subject nonce registry.
//!
//! Each subject holds at most one live nonce. Issuing or chaining a
//! session overwrites the slot, which instantly invalidates every token
//! minted against the previous value regardless of expiry; clearing the
//! slot ends the whole lineage (logout, account removal).
//!
//! Entries are only reclaimed by an explicit clear or overwrite. A subject
//! who never logs out keeps one entry for the process lifetime.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use subtle::ConstantTimeEq;

/// Registry mapping subjects to their current nonce.
///
/// All operations take a single short-lived lock and never touch I/O.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    entries: Mutex<HashMap<String, String>>,
}

impl NonceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `nonce` as the current value for `subject`, superseding any
    /// previous one.
    pub fn put(&self, subject: &str, nonce: &str) {
        self.lock().insert(subject.to_owned(), nonce.to_owned());
    }

    /// Returns the current nonce for `subject`, or `None` when the subject
    /// has no live lineage.
    #[must_use]
    pub fn get(&self, subject: &str) -> Option<String> {
        self.lock().get(subject).cloned()
    }

    /// Compares `candidate` against the subject's current nonce in constant
    /// time.
    ///
    /// An absent entry compares as the empty string through the same code
    /// path, so timing does not distinguish "never issued" from "wrong
    /// nonce".
    #[must_use]
    pub fn matches(&self, subject: &str, candidate: &str) -> bool {
        let entries = self.lock();
        let current = entries.get(subject).map(String::as_str).unwrap_or("");
        current.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Removes the subject's entry, invalidating all outstanding tokens.
    /// Clearing an absent subject is a no-op.
    pub fn clear(&self, subject: &str) {
        self.lock().remove(subject);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // Entries are plain strings; a poisoned guard is still coherent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
