//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::booking::is_valid_email;

/// Email configuration (Resend)
///
/// Without an API key, outside production, messages are captured in memory
/// instead of sent.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    #[serde(default = "default_resend_base_url")]
    pub resend_base_url: String,

    /// Mail request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name, also the organisation name in client emails
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// API key, if one is configured and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Validate email configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        match self.api_key() {
            Some(key) if !key.starts_with("re_") => return Err(ValidationError::InvalidResendKey),
            None if production => return Err(ValidationError::MissingRequired("RESEND_API_KEY")),
            _ => {}
        }
        if !is_valid_email(&self.from_email) {
            return Err(ValidationError::InvalidEmailAddress("from_email"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            resend_base_url: default_resend_base_url(),
            timeout_secs: default_timeout(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_from_email() -> String {
    "bookings@unisonmentalhealth.com".to_string()
}

fn default_from_name() -> String {
    "Unison Mental Health".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.from_email, "bookings@unisonmentalhealth.com");
        assert_eq!(config.from_name, "Unison Mental Health");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_missing_key_allowed_outside_production() {
        assert!(EmailConfig::default().validate(false).is_ok());
        assert!(matches!(
            EmailConfig::default().validate(true),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = EmailConfig {
            resend_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = EmailConfig {
            resend_api_key: Some("sk_xxx".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(false),
            Err(ValidationError::InvalidResendKey)
        ));
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            resend_api_key: Some("re_xxx".to_string()),
            from_email: "invalid-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = EmailConfig {
            resend_api_key: Some("re_abcd1234".to_string()),
            ..Default::default()
        };
        assert!(config.validate(true).is_ok());
    }
}
