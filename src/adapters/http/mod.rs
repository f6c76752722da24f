//! HTTP adapters - endpoint implementations.

pub mod booking;

pub use booking::{booking_routes, BookingHandlers, BookingRedirects};
