//! Transition checking for status enums.

use super::{DomainError, ErrorCode};

/// A status enum with a fixed set of legal moves.
///
/// Implementors list their edges once; `transition_to` refuses anything else
/// with `ErrorCode::InvalidStateTransition`.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Every status reachable in one move from `self`.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            return Ok(target);
        }
        Err(DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot move from {:?} to {:?}", self, target),
        )
        .with_detail("from", format!("{:?}", self))
        .with_detail("to", format!("{:?}", target)))
    }
}
