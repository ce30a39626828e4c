//! # gatekey-auth
//!
//! Session credential core for the GateKey service.
//!
//! This crate provides:
//! - Signed session token encoding and decoding
//! - Per-subject nonce registry for instant revocation
//! - Chain renewal (rotating refresh) of session tokens
//! - Single-use email-ownership verification tickets
//! - Password hashing helpers
//! - The storage contract user backends implement
//!
//! ## Overview
//!
//! A session token is a signed three-claim JWT (`subject`, `uniq`, `date`).
//! The `uniq` claim ties the token to the subject's current lineage in the
//! [`token::NonceRegistry`]: issuing or chaining rotates the lineage, and
//! clearing it invalidates every outstanding token for that subject
//! regardless of expiry. Each subject therefore has at most one valid
//! session at a time.
//!
//! ## Modules
//!
//! - [`config`] - Auth configuration types and validation
//! - [`error`] - Error taxonomy shared across the service
//! - [`password`] - Argon2id password hashing
//! - [`storage`] - User record and storage trait
//! - [`token`] - Token codec, signing keys, nonce registry, session protocol
//! - [`verify`] - Email-ownership verification tickets and protocol

pub mod config;
pub mod error;
pub mod password;
pub mod storage;
pub mod token;
pub mod verify;

pub use config::{AuthConfig, ConfigError, SigningConfig};
pub use error::{AuthError, ErrorCategory};
pub use storage::{User, UserStorage};
pub use token::{
    AlgorithmFamily, NonceRegistry, SessionClaims, SigningKeys, TokenCodec, TokenService,
    TokenStatus,
};
pub use verify::{TicketStore, VerificationService};

/// Type alias for results across the auth core.
pub type AuthResult<T> = Result<T, AuthError>;
