//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `THERAPAIR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use therapair::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod booking;
mod email;
mod error;
mod server;
mod widget;

pub use booking::BookingConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use widget::WidgetConfig;

use serde::Deserialize;

use crate::domain::booking::Organisation;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development setup (mail captured in memory, roster from `data/`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Booking endpoint configuration
    #[serde(default)]
    pub booking: BookingConfig,

    /// Roster, ranking and presentation
    #[serde(default)]
    pub widget: WidgetConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `THERAPAIR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `THERAPAIR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `THERAPAIR__WIDGET__WEIGHTS__SPECIALTY_MATCH=12` -> `widget.weights.specialty_match = 12`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("THERAPAIR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.email.validate(self.is_production())?;
        self.booking.validate()?;
        self.widget.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// The practice named in booking emails
    pub fn organisation(&self) -> Organisation {
        Organisation {
            name: self.email.from_name.clone(),
            sender_address: self.email.from_email.clone(),
            operator_address: self.booking.operator_email.clone(),
            website_url: self.booking.website_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "THERAPAIR__SERVER__PORT",
        "THERAPAIR__SERVER__ENVIRONMENT",
        "THERAPAIR__EMAIL__RESEND_API_KEY",
        "THERAPAIR__BOOKING__OPERATOR_EMAIL",
        "THERAPAIR__WIDGET__MAX_RESULTS",
        "THERAPAIR__WIDGET__WEIGHTS__SPECIALTY_MATCH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.booking.operator_email, "tino@unisonmentalhealth.com");
        assert_eq!(config.widget.max_results, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("THERAPAIR__SERVER__PORT", "3000");
        env::set_var("THERAPAIR__WIDGET__MAX_RESULTS", "5");
        env::set_var("THERAPAIR__WIDGET__WEIGHTS__SPECIALTY_MATCH", "12");
        env::set_var("THERAPAIR__BOOKING__OPERATOR_EMAIL", "intake@example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.widget.max_results, 5);
        assert_eq!(config.widget.weights.specialty_match, 12);
        assert_eq!(config.organisation().operator_address, "intake@example.com");
    }

    #[test]
    fn test_production_requires_mail_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("THERAPAIR__SERVER__ENVIRONMENT", "production");
        let without_key = AppConfig::load();
        env::set_var("THERAPAIR__EMAIL__RESEND_API_KEY", "re_live_123");
        let with_key = AppConfig::load();
        clear_env();

        let without_key = without_key.unwrap();
        assert!(without_key.is_production());
        assert!(without_key.validate().is_err());
        assert!(with_key.unwrap().validate().is_ok());
    }
}
