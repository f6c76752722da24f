//! HTTP handlers for the booking endpoint.
//!
//! Every outcome is a redirect: the widget is a static page and reads the
//! result from the query string.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use crate::application::handlers::booking::{SubmitBookingCommand, SubmitBookingHandler};
use crate::domain::booking::{BookingForm, BookingRejection, DeliveryStatus};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Where each outcome redirects to.
#[derive(Debug, Clone)]
pub struct BookingRedirects {
    /// Page that receives `?error=...`.
    pub error_page: String,
    /// Page that receives `?status=...`.
    pub thank_you_page: String,
}

impl BookingRedirects {
    pub fn rejected(&self, rejection: BookingRejection) -> String {
        format!("{}?error={}", self.error_page, rejection.query_value())
    }

    pub fn delivered(&self, status: DeliveryStatus) -> String {
        format!("{}?status={}", self.thank_you_page, status.query_value())
    }
}

impl Default for BookingRedirects {
    fn default() -> Self {
        Self {
            error_page: "/".to_string(),
            thank_you_page: "/therapair-widget/booking-thank-you.html".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct BookingHandlers {
    submit_handler: Arc<SubmitBookingHandler>,
    redirects: Arc<BookingRedirects>,
}

impl BookingHandlers {
    pub fn new(submit_handler: Arc<SubmitBookingHandler>, redirects: BookingRedirects) -> Self {
        Self {
            submit_handler,
            redirects: Arc::new(redirects),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /submit-booking - Validate, notify, redirect
pub async fn submit_booking(
    State(handlers): State<BookingHandlers>,
    form: Result<Form<BookingForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            tracing::info!(error = %e, "Unreadable booking form");
            let location = handlers.redirects.rejected(BookingRejection::MissingFields);
            return Redirect::to(&location).into_response();
        }
    };

    let cmd = SubmitBookingCommand {
        form,
        submitted_at: Utc::now(),
    };

    let location = match handlers.submit_handler.handle(cmd).await {
        Ok(result) => handlers.redirects.delivered(result.status),
        Err(rejection) => handlers.redirects.rejected(rejection),
    };
    Redirect::to(&location).into_response()
}

/// Any other method on /submit-booking - back to the home page
pub async fn redirect_home() -> Redirect {
    Redirect::to("/")
}
