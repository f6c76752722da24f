//! Email adapters - implementations of the `Mailer` port.

mod in_memory;
mod resend;

pub use in_memory::InMemoryMailer;
pub use resend::{ResendConfig, ResendMailer};
