//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Therapair domain.

mod errors;
mod flow_status;
mod ids;
mod state_machine;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use flow_status::FlowStatus;
pub use ids::{SessionId, StepId, TherapistId};
pub use state_machine::StateMachine;
