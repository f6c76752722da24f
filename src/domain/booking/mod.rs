//! Booking module - validation and notification composition for booking
//! requests submitted from the results page.
//!
//! # Flow
//!
//! `BookingForm` (raw) → `BookingRequest::from_form` (sanitise, validate) →
//! `BookingNotifications` (operator + client emails) → `DeliveryStatus`.

mod notification;
mod request;
mod sanitize;

pub use notification::{BookingNotifications, DeliveryStatus, Mailbox, Organisation, OutboundEmail};
pub use request::{BookingForm, BookingRejection, BookingRequest, TIMESTAMP_FORMAT};
pub use sanitize::{escape_html, is_valid_email, sanitize};
