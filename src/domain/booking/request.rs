//! Booking form input and its validated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sanitize::{is_valid_email, sanitize};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Format used for submission timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw form fields as posted by the widget. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(rename = "Full_Name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "Selected_Therapist", default)]
    pub selected_therapist: Option<String>,
    #[serde(rename = "Selected_Specialty", default)]
    pub selected_specialty: Option<String>,
    #[serde(rename = "Preferences_Summary", default)]
    pub preferences_summary: Option<String>,
    #[serde(rename = "User_Responses", default)]
    pub user_responses: Option<String>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
}

/// Why a submission was turned away. Nothing is sent for a rejected form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRejection {
    #[error("Name, email and therapist are required")]
    MissingFields,

    #[error("Email address is not valid")]
    InvalidEmail,
}

impl BookingRejection {
    /// Value of the `error` query parameter on the redirect.
    pub fn query_value(&self) -> &'static str {
        match self {
            BookingRejection::MissingFields => "missing-fields",
            BookingRejection::InvalidEmail => "invalid-email",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingRejection::MissingFields => ErrorCode::EmptyField,
            BookingRejection::InvalidEmail => ErrorCode::InvalidFormat,
        }
    }
}

impl From<BookingRejection> for DomainError {
    fn from(err: BookingRejection) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// A sanitised, validated booking.
///
/// Text fields are trimmed, tag-stripped and HTML-escaped, so they can be
/// placed into HTML bodies as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    full_name: String,
    email: String,
    phone: String,
    selected_therapist: String,
    selected_specialty: Option<String>,
    preferences_summary: String,
    user_responses: serde_json::Value,
    timestamp: String,
}

impl BookingRequest {
    /// Validates a form. `now` stamps submissions that carry no timestamp.
    pub fn from_form(form: &BookingForm, now: DateTime<Utc>) -> Result<Self, BookingRejection> {
        let clean = |field: &Option<String>| field.as_deref().map(sanitize).unwrap_or_default();

        let full_name = clean(&form.full_name);
        let email = clean(&form.email);
        let selected_therapist = clean(&form.selected_therapist);

        if full_name.is_empty() || email.is_empty() || selected_therapist.is_empty() {
            return Err(BookingRejection::MissingFields);
        }
        if !is_valid_email(&email) {
            return Err(BookingRejection::InvalidEmail);
        }

        let selected_specialty = Some(clean(&form.selected_specialty)).filter(|s| !s.is_empty());
        let timestamp = Some(clean(&form.timestamp))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| now.format(TIMESTAMP_FORMAT).to_string());

        Ok(Self {
            full_name,
            email,
            phone: clean(&form.phone),
            selected_therapist,
            selected_specialty,
            preferences_summary: clean(&form.preferences_summary),
            user_responses: parse_responses(form.user_responses.as_deref()),
            timestamp,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// First whitespace-separated word of the name.
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn selected_therapist(&self) -> &str {
        &self.selected_therapist
    }

    pub fn selected_specialty(&self) -> Option<&str> {
        self.selected_specialty.as_deref()
    }

    pub fn preferences_summary(&self) -> &str {
        &self.preferences_summary
    }

    pub fn user_responses(&self) -> &serde_json::Value {
        &self.user_responses
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Questionnaire answers posted alongside the booking; anything that is not
/// valid JSON becomes an empty object.
fn parse_responses(raw: Option<&str>) -> serde_json::Value {
    raw.and_then(|r| serde_json::from_str(r).ok())
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    fn valid_form() -> BookingForm {
        BookingForm {
            full_name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("0400 000 000".into()),
            selected_therapist: Some("Adam Forman".into()),
            selected_specialty: Some("General Support".into()),
            preferences_summary: Some("Online, flexible".into()),
            user_responses: Some(r#"{"who_for":"myself"}"#.into()),
            timestamp: Some("2025-01-01 10:00:00".into()),
        }
    }

    #[test]
    fn accepts_complete_form() {
        let request = BookingRequest::from_form(&valid_form(), now()).unwrap();
        assert_eq!(request.full_name(), "Jane Doe");
        assert_eq!(request.first_name(), "Jane");
        assert_eq!(request.timestamp(), "2025-01-01 10:00:00");
        assert_eq!(request.user_responses()["who_for"], "myself");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        for strip in 0..3 {
            let mut form = valid_form();
            match strip {
                0 => form.full_name = None,
                1 => form.email = Some("   ".into()),
                _ => form.selected_therapist = Some("<b></b>".into()),
            }
            assert_eq!(
                BookingRequest::from_form(&form, now()).unwrap_err(),
                BookingRejection::MissingFields
            );
        }
    }

    #[test]
    fn missing_fields_checked_before_email_format() {
        let form = BookingForm {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert_eq!(
            BookingRequest::from_form(&form, now()).unwrap_err(),
            BookingRejection::MissingFields
        );
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut form = valid_form();
        form.email = Some("jane@".into());
        let err = BookingRequest::from_form(&form, now()).unwrap_err();
        assert_eq!(err, BookingRejection::InvalidEmail);
        assert_eq!(err.query_value(), "invalid-email");
    }

    #[test]
    fn missing_timestamp_defaults_to_now() {
        let mut form = valid_form();
        form.timestamp = None;
        let request = BookingRequest::from_form(&form, now()).unwrap();
        assert_eq!(request.timestamp(), "2025-03-14 09:26:53");
    }

    #[test]
    fn unparseable_responses_become_empty_object() {
        let mut form = valid_form();
        form.user_responses = Some("{not json".into());
        let request = BookingRequest::from_form(&form, now()).unwrap();
        assert_eq!(request.user_responses(), &serde_json::json!({}));
    }

    #[test]
    fn blank_specialty_is_absent() {
        let mut form = valid_form();
        form.selected_specialty = Some(" ".into());
        let request = BookingRequest::from_form(&form, now()).unwrap();
        assert!(request.selected_specialty().is_none());
    }

    #[test]
    fn values_are_sanitised() {
        let mut form = valid_form();
        form.full_name = Some(" <i>Jane</i> O'Neil ".into());
        let request = BookingRequest::from_form(&form, now()).unwrap();
        assert_eq!(request.full_name(), "Jane O&#039;Neil");
    }
}
