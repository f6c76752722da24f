//! Questionnaire-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, StepId};

/// Caller-misuse errors raised by [`super::QuestionFlow`].
///
/// Every variant leaves the flow state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Step '{actual}' is not the current step (current: {expected})")]
    WrongStep { expected: String, actual: StepId },

    #[error("Step '{step}' has no option '{value}'")]
    UnknownOption { step: StepId, value: String },

    #[error("Option '{value}' of step '{step}' is disabled")]
    OptionDisabled { step: StepId, value: String },

    #[error("Step '{step}' needs at least {required} selection(s), got {selected}")]
    SelectionRequired {
        step: StepId,
        required: usize,
        selected: usize,
    },

    #[error("Cannot go back from the first step")]
    HistoryEmpty,

    #[error("Questionnaire is complete; reset to change answers")]
    FlowCompleted,

    #[error("Step '{0}' is not in the catalog")]
    UnknownStep(StepId),
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::WrongStep { .. } => ErrorCode::WrongStep,
            FlowError::UnknownOption { .. } => ErrorCode::OptionNotFound,
            FlowError::OptionDisabled { .. } => ErrorCode::OptionDisabled,
            FlowError::SelectionRequired { .. } => ErrorCode::SelectionRequired,
            FlowError::HistoryEmpty => ErrorCode::HistoryEmpty,
            FlowError::FlowCompleted => ErrorCode::FlowCompleted,
            FlowError::UnknownStep(_) => ErrorCode::StepNotFound,
        }
    }
}

impl From<FlowError> for DomainError {
    fn from(err: FlowError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
