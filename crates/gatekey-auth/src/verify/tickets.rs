//! Single-use verification ticket storage.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Maps opaque tickets to the subject that requested verification.
///
/// A ticket is consumable exactly once: lookup and removal happen in one
/// critical section, so two concurrent consumers of the same ticket cannot
/// both succeed.
#[derive(Debug)]
pub struct TicketStore {
    tickets: Mutex<HashMap<String, String>>,
    ticket_length: usize,
}

impl TicketStore {
    /// Creates an empty store drawing tickets of `ticket_length` random
    /// bytes.
    #[must_use]
    pub fn new(ticket_length: usize) -> Self {
        Self {
            tickets: Mutex::new(HashMap::new()),
            ticket_length,
        }
    }

    /// Draws a fresh ticket for `subject` and stores it.
    ///
    /// A colliding draw is re-drawn, never overwritten.
    pub fn create(&self, subject: &str) -> String {
        let length = self.ticket_length;
        self.create_with(subject, || generate_ticket(length))
    }

    fn create_with(&self, subject: &str, mut draw: impl FnMut() -> String) -> String {
        let mut tickets = self.lock();
        loop {
            let ticket = draw();
            match tickets.entry(ticket.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(subject.to_owned());
                    return ticket;
                }
            }
        }
    }

    /// Consumes a ticket, returning its subject. At most one caller ever
    /// observes `Some` for a given ticket.
    #[must_use]
    pub fn consume(&self, ticket: &str) -> Option<String> {
        self.lock().remove(ticket)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.tickets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Generates `length` bytes of randomness, base64url-encoded.
fn generate_ticket(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill(bytes.as_mut_slice());
    URL_SAFE_NO_PAD.encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_consume() {
        let store = TicketStore::new(32);
        let ticket = store.create("u1");
        assert_eq!(store.consume(&ticket).as_deref(), Some("u1"));
    }

    #[test]
    fn test_consume_is_single_use() {
        let store = TicketStore::new(32);
        let ticket = store.create("u1");
        assert!(store.consume(&ticket).is_some());
        assert!(store.consume(&ticket).is_none());
    }

    #[test]
    fn test_consume_unknown_ticket() {
        let store = TicketStore::new(32);
        assert!(store.consume("never-issued").is_none());
    }

    #[test]
    fn test_collision_draws_again() {
        let store = TicketStore::new(32);
        let first = store.create("u1");

        let mut draws = vec!["fresh".to_owned(), first.clone()];
        let ticket = store.create_with("u2", || draws.pop().expect("enough draws"));

        // The colliding draw was skipped; u1's pending ticket is intact.
        assert_eq!(ticket, "fresh");
        assert_eq!(store.consume(&first).as_deref(), Some("u1"));
        assert_eq!(store.consume("fresh").as_deref(), Some("u2"));
    }

    #[test]
    fn test_tickets_are_unique_per_draw() {
        let store = TicketStore::new(32);
        let a = store.create("u1");
        let b = store.create("u1");
        assert_ne!(a, b);

        // Both stay live; tickets are per-draw, not per-subject.
        assert_eq!(store.consume(&a).as_deref(), Some("u1"));
        assert_eq!(store.consume(&b).as_deref(), Some("u1"));
    }
}
