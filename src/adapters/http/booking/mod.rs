//! HTTP adapter for booking submissions.

mod handlers;
mod routes;

pub use handlers::{BookingHandlers, BookingRedirects};
pub use routes::booking_routes;
