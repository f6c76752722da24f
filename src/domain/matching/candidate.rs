use serde::Serialize;

use super::therapist::TherapistProfile;

/// A therapist that passed filtering, with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub profile: TherapistProfile,
    pub score: u32,
    /// Profile specialties shared with the user's concerns, in profile order.
    pub matched_specialties: Vec<String>,
}

impl Candidate {
    pub fn therapist_name(&self) -> &str {
        self.profile.name()
    }
}
