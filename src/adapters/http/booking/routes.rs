//! HTTP routes for the booking endpoint.

use axum::{routing::post, Router};

use super::handlers::{redirect_home, submit_booking, BookingHandlers};

/// Creates the booking router.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route(
            "/submit-booking",
            post(submit_booking).fallback(redirect_home),
        )
        .with_state(handlers)
}
