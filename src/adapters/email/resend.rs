//! Resend Mailer - sends email through the Resend HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ResendConfig::new(api_key)
//!     .with_base_url("https://api.resend.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let mailer = ResendMailer::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::booking::OutboundEmail;
use crate::ports::{MailError, Mailer};

/// Configuration for the Resend mailer.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.resend.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Resend API mailer.
pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn to_resend_request(email: &OutboundEmail) -> ResendRequest {
        ResendRequest {
            from: email.from.to_string(),
            to: vec![email.to.to_string()],
            reply_to: email.reply_to.to_string(),
            subject: email.subject.clone(),
            html: email.html.clone(),
        }
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, MailError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ResendErrorBody>(&error_body)
            .map(|body| body.message)
            .unwrap_or(error_body);

        match status.as_u16() {
            401 | 403 => Err(MailError::AuthenticationFailed),
            code => Err(MailError::Rejected {
                status: code,
                message,
            }),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key())
            .json(&Self::to_resend_request(email))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    MailError::Network(format!("Connection failed: {}", e))
                } else {
                    MailError::Network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;
        let sent: ResendResponse = response
            .json()
            .await
            .map_err(|e| MailError::Network(format!("Unreadable response: {}", e)))?;

        tracing::info!(message_id = %sent.id, subject = %email.subject, "Email sent");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Resend API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ResendRequest {
    from: String,
    to: Vec<String>,
    reply_to: String,
    subject: String,
    html: String,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}
