//! Session token generation, validation and lifecycle.
//!
//! - [`keys`] - signing material and algorithm-family selection
//! - [`codec`] - structural encode/decode of the signed token
//! - [`nonces`] - per-subject nonce registry (the revocation mechanism)
//! - [`service`] - the issue/verify/chain/revoke protocol

pub mod codec;
pub mod keys;
pub mod nonces;
pub mod service;

pub use codec::{SessionClaims, TokenCodec};
pub use keys::{AlgorithmFamily, SigningKeys};
pub use nonces::NonceRegistry;
pub use service::{TokenService, TokenStatus};
