//! Session endpoints: chain, check, logout.

use axum::Json;
use axum::extract::State;
use gatekey_auth::AuthError;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::{Ack, TokenResponse};
use crate::state::AppState;

/// Request body for `/chain`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainRequest {
    /// The token to exchange.
    pub token: String,
}

/// Request body for `/check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The token to check.
    pub token: String,
}

/// Response body for `/check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Whether the token is currently valid.
    #[serde(rename = "match")]
    pub matches: bool,
}

/// Request body for `/logout`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// A currently valid session token.
    pub token: String,
}

/// Exchanges a valid token for a successor, invalidating the one handed
/// in.
pub async fn chain(
    State(state): State<AppState>,
    Json(req): Json<ChainRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.tokens.chain(&req.token)?;
    Ok(Json(TokenResponse { token: Some(token) }))
}

/// Reports whether a token is currently valid.
///
/// A decodable but lapsed token is `match: false`, not an error.
pub async fn check(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let status = state.tokens.verify(&req.token)?;
    Ok(Json(CheckResponse {
        matches: status.valid,
    }))
}

/// Ends the session lineage behind a valid token.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<Ack>, ApiError> {
    let status = state.tokens.verify(&req.token)?;
    if !status.valid {
        return Err(AuthError::unauthorized("not connected").into());
    }

    state.tokens.revoke(&status.subject);
    Ok(Json(Ack::default()))
}
