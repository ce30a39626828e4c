//! Email-ownership verification.
//!
//! Signup (when verification is required) mints a single-use opaque ticket
//! and mails it to the claimed address. Presenting the ticket proves
//! control of the mailbox: the ticket is consumed, the account marked
//! verified, and an initial session token issued.
//!
//! Tickets carry no expiry: one lives until it is consumed or the process
//! restarts. Deployments that need a bound should rate-limit signup rather
//! than rely on ticket death.

pub mod service;
pub mod tickets;

pub use service::VerificationService;
pub use tickets::TicketStore;
