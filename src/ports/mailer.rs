//! Mailer port - outbound transport for composed emails.
//!
//! The booking handler composes messages in the domain and hands them to a
//! `Mailer`. Delivery failures are reported back, never retried here.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::booking::OutboundEmail;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for sending email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. `Ok` means the transport accepted it.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Mail transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// Transport rejected our credentials.
    #[error("mail authentication failed")]
    AuthenticationFailed,

    /// Transport refused the message.
    #[error("message rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network error reaching the transport.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("mail request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport is not configured.
    #[error("mail transport not configured: {0}")]
    NotConfigured(String),
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        DomainError::new(ErrorCode::MailTransportError, err.to_string())
    }
}
