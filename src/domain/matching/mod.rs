//! Matching module - therapist roster and the ranking engine.
//!
//! # Components
//!
//! - `TherapistProfile` - static reference data, one per therapist
//! - `Roster` - profile list loaded leniently from JSON
//! - `MatchCriteria` - answers normalised for matching
//! - `MatchEngine` - filter, score, stable sort, truncate

mod candidate;
mod criteria;
mod engine;
mod roster;
mod therapist;
mod weights;

pub use candidate::Candidate;
pub use criteria::{LivedExperience, MatchCriteria, Urgency};
pub use engine::{Exclusion, ExclusionReason, MatchEngine, MatchReport, DEFAULT_MAX_RESULTS};
pub use roster::{Roster, RosterError, SkippedRecord};
pub use therapist::{Availability, Modality, TherapistProfile};
pub use weights::ScoringWeights;
