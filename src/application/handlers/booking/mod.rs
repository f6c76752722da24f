//! Booking handlers.

mod submit_booking;

pub use submit_booking::{SubmitBookingCommand, SubmitBookingHandler, SubmitBookingResult};
