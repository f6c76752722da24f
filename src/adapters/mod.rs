//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `email` - Mail transports (Resend API, in-memory)
//! - `roster` - Roster loading from JSON files
//! - `http` - axum routes for the booking endpoint

pub mod email;
pub mod http;
pub mod roster;

pub use email::{InMemoryMailer, ResendConfig, ResendMailer};
pub use roster::JsonFileRosterSource;
