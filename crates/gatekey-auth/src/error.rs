//! Error taxonomy for the session credential core.
//!
//! Token decoding distinguishes a structurally unparseable token
//! ([`AuthError::MalformedToken`]) from one whose signature or declared
//! algorithm family does not verify ([`AuthError::BadSignature`]); a token
//! that decodes but is no longer current surfaces as
//! [`AuthError::ExpiredOrStale`] where an operation requires validity.
//! Internal faults (signing, storage, key loading) are never exposed to
//! callers with detail; the boundary layer maps them to an opaque failure.

use std::fmt;

/// Errors that can occur across session and verification operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token string is not a well-formed signed token.
    #[error("malformed token")]
    MalformedToken,

    /// The signature does not verify, or the token header declares an
    /// algorithm family other than the configured one.
    #[error("bad signature")]
    BadSignature,

    /// The token decoded but its nonce or date check failed.
    #[error("expired or superseded token")]
    ExpiredOrStale,

    /// Signing key material could not be loaded or parsed (startup-time).
    #[error("key load error: {message}")]
    KeyLoad {
        /// Description of the key loading failure.
        message: String,
    },

    /// The verification ticket was never issued or is already consumed.
    #[error("unknown verification ticket")]
    TicketNotFound,

    /// The signing operation itself failed.
    #[error("signing error: {message}")]
    InternalSigning {
        /// Description of the signing failure.
        message: String,
    },

    /// A user storage operation failed.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    /// The record conflicts with an existing one (duplicate name or email).
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflict.
        message: String,
    },

    /// The referenced record does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Description of what was not found.
        message: String,
    },

    /// The request lacks a valid, current credential.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The request content failed validation.
    #[error("invalid request: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `KeyLoad` error.
    #[must_use]
    pub fn key_load(message: impl Into<String>) -> Self {
        Self::KeyLoad {
            message: message.into(),
        }
    }

    /// Creates a new `InternalSigning` error.
    #[must_use]
    pub fn internal_signing(message: impl Into<String>) -> Self {
        Self::InternalSigning {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken
                | Self::BadSignature
                | Self::ExpiredOrStale
                | Self::TicketNotFound
                | Self::Conflict { .. }
                | Self::NotFound { .. }
                | Self::Unauthorized { .. }
                | Self::Validation { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category). These are
    /// reported to callers without detail.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::KeyLoad { .. }
                | Self::InternalSigning { .. }
                | Self::Storage { .. }
                | Self::Internal { .. }
        )
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedToken => ErrorCategory::Token,
            Self::BadSignature => ErrorCategory::Token,
            Self::ExpiredOrStale => ErrorCategory::Token,
            Self::TicketNotFound => ErrorCategory::Authentication,
            Self::Unauthorized { .. } => ErrorCategory::Authentication,
            Self::Conflict { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::Validation,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::KeyLoad { .. } => ErrorCategory::Configuration,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::InternalSigning { .. } => ErrorCategory::Internal,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// High-level error categories for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Token structure, signature or currency problems.
    Token,
    /// Missing or invalid credentials.
    Authentication,
    /// Malformed or conflicting request content.
    Validation,
    /// Invalid deployment configuration.
    Configuration,
    /// Storage backend faults.
    Infrastructure,
    /// Unexpected internal faults.
    Internal,
}

impl ErrorCategory {
    /// Returns the category name as a static string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Infrastructure => "infrastructure",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_server_split() {
        assert!(AuthError::MalformedToken.is_client_error());
        assert!(AuthError::BadSignature.is_client_error());
        assert!(AuthError::ExpiredOrStale.is_client_error());
        assert!(AuthError::TicketNotFound.is_client_error());
        assert!(AuthError::unauthorized("no token").is_client_error());

        assert!(AuthError::key_load("bad pem").is_server_error());
        assert!(AuthError::internal_signing("boom").is_server_error());
        assert!(AuthError::storage("down").is_server_error());

        assert!(!AuthError::MalformedToken.is_server_error());
        assert!(!AuthError::storage("down").is_client_error());
    }

    #[test]
    fn test_categories() {
        assert_eq!(AuthError::BadSignature.category(), ErrorCategory::Token);
        assert_eq!(
            AuthError::TicketNotFound.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AuthError::conflict("taken").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            AuthError::key_load("x").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(ErrorCategory::Token.to_string(), "token");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(AuthError::MalformedToken.to_string(), "malformed token");
        assert_eq!(
            AuthError::unauthorized("not connected").to_string(),
            "unauthorized: not connected"
        );
    }
}
