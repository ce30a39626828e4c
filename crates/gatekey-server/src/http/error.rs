//! Error-to-response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gatekey_auth::AuthError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON error body: `{"err": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of the rejection.
    pub err: String,
}

/// Wrapper turning [`AuthError`] into an HTTP response.
///
/// Internal faults become an opaque 500; their detail goes to the log
/// only. Everything else is a client rejection carrying its message.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        if err.is_server_error() {
            error!(category = %err.category(), error = %err, "internal error");
            let body = ErrorBody {
                err: "internal error".to_owned(),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }

        let status = match err {
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            err: err.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let response = ApiError(AuthError::MalformedToken).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(AuthError::unauthorized("not connected")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let response = ApiError(AuthError::internal_signing("key went missing")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
