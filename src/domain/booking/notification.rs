//! Composition of the two booking notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::request::BookingRequest;
use super::sanitize::escape_html;

/// Name and address pair, rendered as `Name <address>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub name: Option<String>,
    pub address: String,
}

impl Mailbox {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A composed HTML email ready for a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: Mailbox,
    pub subject: String,
    pub html: String,
}

/// The practice receiving bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organisation {
    pub name: String,
    pub sender_address: String,
    pub operator_address: String,
    pub website_url: String,
}

impl Organisation {
    fn sender(&self) -> Mailbox {
        Mailbox::named(&self.name, &self.sender_address)
    }

    fn operator(&self) -> Mailbox {
        Mailbox::new(&self.operator_address)
    }
}

/// Builds both notifications for a validated booking.
#[derive(Debug, Clone)]
pub struct BookingNotifications {
    organisation: Organisation,
}

impl BookingNotifications {
    pub fn new(organisation: Organisation) -> Self {
        Self { organisation }
    }

    pub fn organisation(&self) -> &Organisation {
        &self.organisation
    }

    /// Message to the practice, replying to the client.
    pub fn operator_notification(&self, request: &BookingRequest) -> OutboundEmail {
        let mut fields = vec![
            field("Selected Therapist", request.selected_therapist()),
            field("Client Name", request.full_name()),
            format!(
                "<p><strong>Email:</strong> <a href=\"mailto:{0}\">{0}</a></p>",
                request.email()
            ),
            format!(
                "<p><strong>Phone:</strong> <a href=\"tel:{0}\">{0}</a></p>",
                request.phone()
            ),
        ];
        if let Some(specialty) = request.selected_specialty() {
            fields.push(field("Specialty", specialty));
        }
        fields.push(field("Preferences Summary", request.preferences_summary()));
        fields.push(field("Submitted", request.timestamp()));

        let html = format!(
            "<html><body><h1>New Booking Request</h1>{}<p>Please contact the client within 1 business day.</p></body></html>",
            fields.concat()
        );

        OutboundEmail {
            from: self.organisation.sender(),
            to: self.organisation.operator(),
            reply_to: Mailbox::new(request.email()),
            subject: format!(
                "New Booking: {} - {}",
                request.selected_therapist(),
                request.full_name()
            ),
            html,
        }
    }

    /// Confirmation to the client, replying to the practice.
    pub fn client_confirmation(&self, request: &BookingRequest) -> OutboundEmail {
        let org = &self.organisation;
        let html = format!(
            "<html><body>\
             <p><strong>Hi {first_name},</strong></p>\
             <p>We've received your booking request.</p>\
             {therapist}{preferences}\
             <p>We'll contact you within 1 business day to schedule your first session.</p>\
             <p><a href=\"{url}\">Visit {org}</a></p>\
             <p>Warm regards,<br>{org} Team</p>\
             </body></html>",
            first_name = request.first_name(),
            therapist = field("Therapist", request.selected_therapist()),
            preferences = field("Your Preferences", request.preferences_summary()),
            url = escape_html(&org.website_url),
            org = escape_html(&org.name),
        );

        OutboundEmail {
            from: org.sender(),
            to: Mailbox::named(request.full_name(), request.email()),
            reply_to: org.operator(),
            subject: format!("Your booking request with {}", org.name),
            html,
        }
    }
}

/// Values reaching here are already escaped by sanitisation.
fn field(label: &str, value: &str) -> String {
    format!("<p><strong>{}:</strong> {}</p>", label, value)
}

/// Outcome of sending both notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Both messages were accepted by the transport.
    Success,
    /// At least one message failed; the booking was still received.
    Sent,
}

impl DeliveryStatus {
    pub fn from_outcomes(operator_delivered: bool, client_delivered: bool) -> Self {
        if operator_delivered && client_delivered {
            DeliveryStatus::Success
        } else {
            DeliveryStatus::Sent
        }
    }

    /// Value of the `status` query parameter on the thank-you redirect.
    pub fn query_value(&self) -> &'static str {
        match self {
            DeliveryStatus::Success => "success",
            DeliveryStatus::Sent => "sent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingForm;
    use chrono::Utc;

    fn organisation() -> Organisation {
        Organisation {
            name: "Unison Mental Health".into(),
            sender_address: "bookings@unisonmentalhealth.com".into(),
            operator_address: "tino@unisonmentalhealth.com".into(),
            website_url: "https://unisonmentalhealth.com".into(),
        }
    }

    fn request(specialty: Option<&str>) -> BookingRequest {
        let form = BookingForm {
            full_name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("0400 000 000".into()),
            selected_therapist: Some("Adam Forman".into()),
            selected_specialty: specialty.map(str::to_string),
            preferences_summary: Some("Online".into()),
            ..Default::default()
        };
        BookingRequest::from_form(&form, Utc::now()).unwrap()
    }

    #[test]
    fn operator_notification_addresses_practice_and_replies_to_client() {
        let email = BookingNotifications::new(organisation()).operator_notification(&request(None));

        assert_eq!(email.subject, "New Booking: Adam Forman - Jane Doe");
        assert_eq!(email.to.address, "tino@unisonmentalhealth.com");
        assert_eq!(email.reply_to.address, "jane@example.com");
        assert_eq!(email.from.to_string(), "Unison Mental Health <bookings@unisonmentalhealth.com>");
        assert!(!email.html.contains("Specialty:"));
    }

    #[test]
    fn specialty_appears_only_when_given() {
        let email = BookingNotifications::new(organisation())
            .operator_notification(&request(Some("Anxiety")));
        assert!(email.html.contains("<strong>Specialty:</strong> Anxiety"));
    }

    #[test]
    fn client_confirmation_greets_by_first_name() {
        let email = BookingNotifications::new(organisation()).client_confirmation(&request(None));

        assert_eq!(email.subject, "Your booking request with Unison Mental Health");
        assert_eq!(email.to.to_string(), "Jane Doe <jane@example.com>");
        assert_eq!(email.reply_to.address, "tino@unisonmentalhealth.com");
        assert!(email.html.contains("Hi Jane,"));
    }

    #[test]
    fn delivery_status_requires_both_messages() {
        assert_eq!(DeliveryStatus::from_outcomes(true, true), DeliveryStatus::Success);
        assert_eq!(DeliveryStatus::from_outcomes(true, false), DeliveryStatus::Sent);
        assert_eq!(DeliveryStatus::from_outcomes(false, true).query_value(), "sent");
    }
}
