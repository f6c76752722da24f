//! RosterSource port - where the therapist roster comes from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::{Roster, RosterError};

/// Port for loading the roster.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Loads the full roster. Malformed records are skipped, not fatal.
    async fn load(&self) -> Result<Roster, RosterSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterSourceError {
    #[error("roster unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Malformed(#[from] RosterError),
}

impl From<RosterSourceError> for DomainError {
    fn from(err: RosterSourceError) -> Self {
        match err {
            RosterSourceError::Unavailable(msg) => {
                DomainError::new(ErrorCode::InternalError, format!("roster unavailable: {}", msg))
            }
            RosterSourceError::Malformed(inner) => inner.into(),
        }
    }
}
