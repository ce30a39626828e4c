//! Shared handler state.

use std::sync::Arc;

use gatekey_auth::{TokenService, UserStorage, VerificationService};

use crate::mail::Mailer;

/// State injected into every handler.
///
/// Constructed once at startup; the registries inside the services are the
/// only shared mutable state in the process.
#[derive(Clone)]
pub struct AppState {
    /// User storage backend.
    pub users: Arc<dyn UserStorage>,

    /// Session token protocol.
    pub tokens: Arc<TokenService>,

    /// Email verification protocol.
    pub verification: Arc<VerificationService>,

    /// Outbound mail transport.
    pub mailer: Arc<dyn Mailer>,

    /// Whether login requires proven email ownership.
    pub require_verification: bool,
}
