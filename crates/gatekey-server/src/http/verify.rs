//! Email verification endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::http::TokenResponse;
use crate::http::error::ApiError;
use crate::state::AppState;

/// Request body for `/verify`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The single-use ticket received by mail.
    pub ticket: String,
}

/// Redeems a verification ticket and logs the subject in.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.verification.redeem(&req.ticket).await?;
    Ok(Json(TokenResponse { token: Some(token) }))
}
