//! MatchCriteria - the user's answers reduced to what matching needs.

use super::therapist::{tag_key, Availability, Modality};
use crate::domain::questionnaire::canonical::{steps, values};
use crate::domain::questionnaire::AnswerSet;

/// How much a shared community matters to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LivedExperience {
    Important,
    NiceToHave,
    NotNeeded,
    #[default]
    Unspecified,
}

impl LivedExperience {
    /// Multiplier applied to the community weight.
    pub fn multiplier(&self) -> u32 {
        match self {
            LivedExperience::Important => 2,
            LivedExperience::NiceToHave | LivedExperience::Unspecified => 1,
            LivedExperience::NotNeeded => 0,
        }
    }
}

/// How soon the user wants to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Asap,
    Weeks,
    #[default]
    Flexible,
}

impl Urgency {
    pub fn accepts(&self, availability: Availability) -> bool {
        match self {
            Urgency::Asap => availability == Availability::Immediate,
            Urgency::Weeks => availability != Availability::Waitlist,
            Urgency::Flexible => true,
        }
    }
}

/// Normalised matching input. Tag lists hold lowercase keys and never contain
/// the "no preference" sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchCriteria {
    pub modality: Option<Modality>,
    pub concerns: Vec<String>,
    pub communities: Vec<String>,
    pub lived_experience: LivedExperience,
    pub urgency: Urgency,
    pub genders: Vec<String>,
    pub approaches: Vec<String>,
}

impl MatchCriteria {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let modality = match answers.first_value(steps::MODALITY) {
            Some(values::MODALITY_ONLINE) => Some(Modality::Online),
            Some(values::MODALITY_IN_PERSON) => Some(Modality::InPerson),
            _ => None,
        };

        let lived_experience = match answers.first_value(steps::COMMUNITY_MATCH) {
            Some(values::LIVED_EXPERIENCE_IMPORTANT) => LivedExperience::Important,
            Some(values::LIVED_EXPERIENCE_NICE) => LivedExperience::NiceToHave,
            Some(values::LIVED_EXPERIENCE_NOT_NEEDED) => LivedExperience::NotNeeded,
            _ => LivedExperience::Unspecified,
        };

        let urgency = match answers.first_value(steps::URGENCY) {
            Some(values::URGENCY_ASAP) => Urgency::Asap,
            Some(values::URGENCY_WEEKS) => Urgency::Weeks,
            _ => Urgency::Flexible,
        };

        Self {
            modality,
            concerns: keys(answers, steps::CONCERNS, &[]),
            communities: keys(answers, steps::COMMUNITIES, &[values::NO_COMMUNITY]),
            lived_experience,
            urgency,
            genders: keys(answers, steps::GENDER, &[values::NO_GENDER_PREFERENCE]),
            approaches: keys(answers, steps::APPROACH, &[values::ANY_APPROACH]),
        }
    }

    /// Modality the therapist must satisfy; `Either` when unconstrained.
    pub fn required_modality(&self) -> Modality {
        self.modality.unwrap_or(Modality::Either)
    }
}

fn keys(
    answers: &AnswerSet,
    step: crate::domain::foundation::StepId,
    sentinels: &[&str],
) -> Vec<String> {
    answers
        .values(step)
        .into_iter()
        .filter(|v| !sentinels.contains(v))
        .map(tag_key)
        .collect()
}
