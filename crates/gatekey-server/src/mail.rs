//! Outbound mail.
//!
//! The service only ever needs "send this verification ticket to that
//! address"; the transport is deployment-specific and sits behind
//! [`Mailer`]. The bundled [`LogMailer`] emits the message as a structured
//! log record, which is the development behavior.

use async_trait::async_trait;
use gatekey_auth::AuthResult;
use tracing::info;

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends a message to a single recipient.
    ///
    /// # Errors
    /// Returns an error when the transport fails; the caller decides
    /// whether that aborts the surrounding operation.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AuthResult<()>;
}

/// Mailer that logs messages instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AuthResult<()> {
        info!(to, subject, body, "outbound mail");
        Ok(())
    }
}
