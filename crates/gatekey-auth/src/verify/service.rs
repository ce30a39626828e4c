//! Verification protocol: ticket issuance and redemption.

use std::sync::Arc;

use tracing::info;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::UserStorage;
use crate::token::TokenService;
use crate::verify::tickets::TicketStore;

/// Orchestrates email-ownership verification.
///
/// Redeeming a ticket marks the subject verified in the user store and
/// logs them in by issuing an initial session token.
pub struct VerificationService {
    tickets: TicketStore,
    users: Arc<dyn UserStorage>,
    tokens: Arc<TokenService>,
}

impl VerificationService {
    /// Creates a service drawing tickets of `ticket_length` random bytes.
    #[must_use]
    pub fn new(
        ticket_length: usize,
        users: Arc<dyn UserStorage>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            tickets: TicketStore::new(ticket_length),
            users,
            tokens,
        }
    }

    /// Creates a pending ticket for `subject`.
    #[must_use]
    pub fn begin(&self, subject: &str) -> String {
        self.tickets.create(subject)
    }

    /// Redeems a ticket: marks the subject verified and issues a session
    /// token.
    ///
    /// # Errors
    /// - [`AuthError::TicketNotFound`] if the ticket was never issued or
    ///   was already consumed
    /// - storage errors from marking the subject verified
    /// - [`AuthError::InternalSigning`] from token issuance
    pub async fn redeem(&self, ticket: &str) -> AuthResult<String> {
        let subject = self
            .tickets
            .consume(ticket)
            .ok_or(AuthError::TicketNotFound)?;
        self.users.mark_verified(&subject).await?;
        info!(subject = %subject, "email verified");
        self.tokens.issue(&subject)
    }
}
