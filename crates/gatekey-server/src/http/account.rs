//! Account endpoints: signup, login, signout.

use axum::Json;
use axum::extract::State;
use gatekey_auth::password::{hash_password, verify_password};
use gatekey_auth::{AuthError, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::http::error::ApiError;
use crate::http::{Ack, TokenResponse};
use crate::state::AppState;

/// Request body for `/signup`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Desired account name.
    pub name: String,
    /// Email address to verify.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for `/login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name or email address.
    pub login: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for `/signout` (account deletion).
#[derive(Debug, Serialize, Deserialize)]
pub struct SignoutRequest {
    /// A currently valid session token.
    pub token: String,
}

/// Creates an account.
///
/// With verification disabled the subject is logged in immediately;
/// otherwise a single-use ticket is mailed to the claimed address and the
/// response carries no token.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_signup(&req)?;

    let password_hash = hash_password(&req.password)?;
    let user = User::new(&req.name, &req.email, password_hash);
    state.users.create(&user).await?;
    info!(subject = %user.id, "account created");

    if !state.require_verification {
        let token = state.tokens.issue(&user.id)?;
        return Ok(Json(TokenResponse { token: Some(token) }));
    }

    let ticket = state.verification.begin(&user.id);
    state
        .mailer
        .send(
            &req.email,
            "Verify your address",
            &format!("Your verification ticket: {ticket}"),
        )
        .await?;

    Ok(Json(TokenResponse { token: None }))
}

fn validate_signup(req: &SignupRequest) -> Result<(), AuthError> {
    if req.password.len() < 10 {
        return Err(AuthError::validation("password too short"));
    }
    if req.name.len() < 3 {
        return Err(AuthError::validation("name too short"));
    }
    if req.email.len() < 3 || !req.email.contains('@') {
        return Err(AuthError::validation("invalid email address"));
    }
    Ok(())
}

/// Exchanges credentials for a session token.
///
/// Unknown logins and wrong passwords produce the same rejection.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(user) = state.users.find_by_login(&req.login).await? else {
        return Err(AuthError::unauthorized("invalid login or password").into());
    };

    if state.require_verification && !user.verified {
        return Err(AuthError::unauthorized("email not verified").into());
    }

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AuthError::unauthorized("invalid login or password").into());
    }

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(TokenResponse { token: Some(token) }))
}

/// Deletes the account behind a valid token and ends its session lineage.
pub async fn signout(
    State(state): State<AppState>,
    Json(req): Json<SignoutRequest>,
) -> Result<Json<Ack>, ApiError> {
    let status = state.tokens.verify(&req.token)?;
    if !status.valid {
        return Err(AuthError::unauthorized("not connected").into());
    }

    state.users.delete(&status.subject).await?;
    state.tokens.revoke(&status.subject);
    info!(subject = %status.subject, "account deleted");

    Ok(Json(Ack::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(validate_signup(&request("alice", "alice@example.com", "long enough pw")).is_ok());

        assert!(validate_signup(&request("alice", "alice@example.com", "short")).is_err());
        assert!(validate_signup(&request("al", "alice@example.com", "long enough pw")).is_err());
        assert!(validate_signup(&request("alice", "not-an-email", "long enough pw")).is_err());
        assert!(validate_signup(&request("alice", "a@", "long enough pw")).is_err());
    }
}
