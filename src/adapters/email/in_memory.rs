//! In-memory Mailer - records messages instead of sending them.
//!
//! Used in development (no API key configured) and in tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::booking::OutboundEmail;
use crate::ports::{MailError, Mailer};

#[derive(Debug, Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_recipients: Vec<String>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every message addressed to `address`.
    pub fn failing_for(mut self, address: impl Into<String>) -> Self {
        self.fail_recipients.push(address.into());
        self
    }

    /// Messages accepted so far, in send order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.fail_recipients.iter().any(|a| *a == email.to.address) {
            return Err(MailError::Rejected {
                status: 422,
                message: format!("recipient {} refused", email.to.address),
            });
        }

        tracing::debug!(to = %email.to, subject = %email.subject, "Email captured");
        self.sent
            .lock()
            .map_err(|_| MailError::Network("mailbox lock poisoned".into()))?
            .push(email.clone());
        Ok(())
    }
}
