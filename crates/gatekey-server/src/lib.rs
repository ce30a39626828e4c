//! # gatekey-server
//!
//! HTTP surface for the GateKey session credential service.
//!
//! Every operation has a concrete, enumerated request/response pair; no
//! field of any request is discovered at runtime. Handlers orchestrate the
//! protocols from `gatekey-auth` and map its error taxonomy onto HTTP
//! statuses.
//!
//! ## Modules
//!
//! - [`config`] - configuration file loading and key material resolution
//! - [`http`] - router and per-endpoint handlers
//! - [`mail`] - outbound mail contract and the logging dev mailer
//! - [`state`] - shared handler state

pub mod config;
pub mod http;
pub mod mail;
pub mod state;

pub use config::{ConfigLoadError, ServerConfig, load_config, load_signing_keys};
pub use http::router;
pub use state::AppState;
