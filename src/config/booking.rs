//! Booking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::booking::is_valid_email;

/// Booking endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Address that receives new booking notifications
    #[serde(default = "default_operator_email")]
    pub operator_email: String,

    /// Public website linked from client emails
    #[serde(default = "default_website_url")]
    pub website_url: String,

    /// Page that shows `?error=...` after a rejected form
    #[serde(default = "default_error_path")]
    pub error_path: String,

    /// Page that shows `?status=...` after an accepted booking
    #[serde(default = "default_thank_you_path")]
    pub thank_you_path: String,
}

impl BookingConfig {
    /// Validate booking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_email(&self.operator_email) {
            return Err(ValidationError::InvalidEmailAddress("operator_email"));
        }
        if !self.error_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("error_path"));
        }
        if !self.thank_you_path.starts_with('/') {
            return Err(ValidationError::InvalidPath("thank_you_path"));
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            operator_email: default_operator_email(),
            website_url: default_website_url(),
            error_path: default_error_path(),
            thank_you_path: default_thank_you_path(),
        }
    }
}

fn default_operator_email() -> String {
    "tino@unisonmentalhealth.com".to_string()
}

fn default_website_url() -> String {
    "https://unisonmentalhealth.com".to_string()
}

fn default_error_path() -> String {
    "/".to_string()
}

fn default_thank_you_path() -> String {
    "/therapair-widget/booking-thank-you.html".to_string()
}
