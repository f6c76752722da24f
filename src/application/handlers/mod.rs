//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod booking;

pub use booking::{SubmitBookingCommand, SubmitBookingHandler, SubmitBookingResult};
