//! SubmitBooking - Command handler for booking requests from the results page.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::booking::{
    BookingForm, BookingNotifications, BookingRejection, BookingRequest, DeliveryStatus,
    OutboundEmail,
};
use crate::ports::Mailer;

/// Command carrying the raw form as posted.
#[derive(Debug, Clone)]
pub struct SubmitBookingCommand {
    pub form: BookingForm,
    pub submitted_at: DateTime<Utc>,
}

/// Result of an accepted booking.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitBookingResult {
    pub request: BookingRequest,
    pub status: DeliveryStatus,
}

/// Handler for booking submissions.
///
/// Validation failures are returned before anything is sent. Once the form
/// is valid the booking counts as received: mail failures only downgrade
/// the delivery status.
pub struct SubmitBookingHandler {
    mailer: Arc<dyn Mailer>,
    notifications: BookingNotifications,
}

impl SubmitBookingHandler {
    pub fn new(mailer: Arc<dyn Mailer>, notifications: BookingNotifications) -> Self {
        Self {
            mailer,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitBookingCommand,
    ) -> Result<SubmitBookingResult, BookingRejection> {
        // 1. Sanitise and validate
        let request = BookingRequest::from_form(&cmd.form, cmd.submitted_at).map_err(|rejection| {
            tracing::info!(reason = rejection.query_value(), "Booking rejected");
            rejection
        })?;

        // 2. Notify the practice, then the client
        let operator_delivered = self
            .deliver("operator", &self.notifications.operator_notification(&request))
            .await;
        let client_delivered = self
            .deliver("client", &self.notifications.client_confirmation(&request))
            .await;

        let status = DeliveryStatus::from_outcomes(operator_delivered, client_delivered);
        tracing::info!(
            therapist = %request.selected_therapist(),
            status = status.query_value(),
            "Booking received"
        );

        Ok(SubmitBookingResult { request, status })
    }

    async fn deliver(&self, recipient: &'static str, email: &OutboundEmail) -> bool {
        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(recipient, error = %e, "Booking email not delivered");
                false
            }
        }
    }
}
