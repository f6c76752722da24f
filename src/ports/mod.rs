//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Mailer` - Outbound email transport for booking notifications
//! - `RosterSource` - Loads the therapist roster

mod mailer;
mod roster_source;

pub use mailer::{MailError, Mailer};
pub use roster_source::{RosterSource, RosterSourceError};
