//! Storage traits for account data.
//!
//! GateKey does not own user persistence; it talks to whatever backend the
//! deployment provides through these traits.
//!
//! # Implementations
//!
//! - `gatekey-db-memory` - in-memory backend for development and tests

pub mod user;

pub use user::{User, UserStorage};
