//! HTTP surface: one typed request/response pair per operation.
//!
//! Endpoints (all POST, JSON bodies):
//!
//! - `/signup` - create an account, start email verification
//! - `/login` - exchange credentials for a session token
//! - `/chain` - exchange a valid token for a fresh one
//! - `/check` - report whether a token is currently valid
//! - `/logout` - end the session lineage behind a token
//! - `/signout` - delete the account behind a token
//! - `/verify` - redeem a verification ticket, log the subject in

mod account;
mod error;
mod session;
mod verify;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

pub use account::{LoginRequest, SignoutRequest, SignupRequest};
pub use error::{ApiError, ErrorBody};
pub use session::{ChainRequest, CheckRequest, CheckResponse, LogoutRequest};
pub use verify::VerifyRequest;

use crate::state::AppState;

/// Maximum accepted request body, in bytes.
const MAX_BODY_BYTES: usize = 1_048_576;

/// Response for every operation that can yield a session token.
///
/// `token` is absent when signup defers login to email verification.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The issued session token, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Empty acknowledgement body.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ack {}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(account::signup))
        .route("/login", post(account::login))
        .route("/signout", post(account::signout))
        .route("/chain", post(session::chain))
        .route("/check", post(session::check))
        .route("/logout", post(session::logout))
        .route("/verify", post(verify::verify_email))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
