//! Scoring weights for the match engine.

use serde::{Deserialize, Serialize};

/// Points awarded per matching signal.
///
/// Scores are non-negative integers so ties compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per specialty shared with the user's concerns.
    pub specialty_match: u32,
    /// Once, when availability fits the requested urgency.
    pub availability_alignment: u32,
    /// Per shared community. Doubled when lived experience is important.
    pub community_match: u32,
    /// Once, when the therapist's gender is among those preferred.
    pub gender_match: u32,
    /// Per shared therapy approach.
    pub approach_match: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            specialty_match: 10,
            availability_alignment: 3,
            community_match: 4,
            gender_match: 2,
            approach_match: 2,
        }
    }
}
