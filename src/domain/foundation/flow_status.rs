//! FlowStatus enum for tracking the lifecycle of a questionnaire run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a questionnaire flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    #[default]
    InProgress,
    /// Reached RESULTS; answers are frozen until reset.
    Completed,
}

impl FlowStatus {
    /// Returns true if answers may still be recorded.
    pub fn is_mutable(&self) -> bool {
        matches!(self, FlowStatus::InProgress)
    }
}

impl StateMachine for FlowStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use FlowStatus::*;
        match self {
            InProgress => vec![Completed],
            Completed => vec![InProgress],
        }
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowStatus::InProgress => "InProgress",
            FlowStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
