//! The Therapair questionnaire: ten steps, one branch.
//!
//! `communities` skips the lived-experience follow-up when the user picks
//! "None of these apply". Two concern options are gated on who the support
//! is for.

use super::{AnswerSet, OptionSpec, QuestionCatalog, QuestionStep, StepTarget};
use crate::domain::foundation::{DomainError, StepId};

/// Step ids of the canonical questionnaire.
pub mod steps {
    use crate::domain::foundation::StepId;

    pub const WHO_FOR: StepId = StepId::new("who_for");
    pub const FIRST_TIME: StepId = StepId::new("first_time");
    pub const MODALITY: StepId = StepId::new("modality");
    pub const CONCERNS: StepId = StepId::new("concerns");
    pub const COMMUNITIES: StepId = StepId::new("communities");
    pub const COMMUNITY_MATCH: StepId = StepId::new("community_match");
    pub const TIMING: StepId = StepId::new("timing");
    pub const URGENCY: StepId = StepId::new("urgency");
    pub const GENDER: StepId = StepId::new("gender");
    pub const APPROACH: StepId = StepId::new("approach");
}

/// Option values with meaning beyond their label.
pub mod values {
    pub const FOR_MYSELF: &str = "myself";
    pub const FOR_PARTNER: &str = "partner";
    pub const FOR_CHILD: &str = "child";

    pub const MODALITY_ONLINE: &str = "online";
    pub const MODALITY_IN_PERSON: &str = "in_person";
    pub const MODALITY_EITHER: &str = "either";

    pub const GENERAL_SUPPORT: &str = "General Support";
    pub const COUPLES: &str = "Couples Counselling";
    pub const CHILD_ADOLESCENT: &str = "Child and Adolescent";

    pub const NO_COMMUNITY: &str = "none";
    pub const LIVED_EXPERIENCE_IMPORTANT: &str = "important";
    pub const LIVED_EXPERIENCE_NICE: &str = "nice_to_have";
    pub const LIVED_EXPERIENCE_NOT_NEEDED: &str = "not_needed";

    pub const FLEXIBLE_TIMING: &str = "flexible";

    pub const URGENCY_ASAP: &str = "asap";
    pub const URGENCY_WEEKS: &str = "weeks";
    pub const URGENCY_WAIT: &str = "wait";

    pub const NO_GENDER_PREFERENCE: &str = "no_preference";
    pub const ANY_APPROACH: &str = "any";
}

use steps::*;

fn is_for_partner(answers: &AnswerSet) -> bool {
    answers.has_value(WHO_FOR, values::FOR_PARTNER)
}

fn is_for_child(answers: &AnswerSet) -> bool {
    answers.has_value(WHO_FOR, values::FOR_CHILD)
}

fn after_communities(answers: &AnswerSet) -> StepTarget {
    let chosen = answers.values(COMMUNITIES);
    if chosen.is_empty() || chosen.contains(&values::NO_COMMUNITY) {
        StepTarget::Step(TIMING)
    } else {
        StepTarget::Step(COMMUNITY_MATCH)
    }
}

/// Builds the canonical catalog.
pub fn canonical_catalog() -> Result<QuestionCatalog, DomainError> {
    QuestionCatalog::new(canonical_steps(), WHO_FOR)
}

fn canonical_steps() -> Vec<QuestionStep> {
    vec![
        QuestionStep::single(
            WHO_FOR,
            "Who are you seeking support for?",
            vec![
                OptionSpec::new("For myself", values::FOR_MYSELF),
                OptionSpec::new("For my partner or relationship", values::FOR_PARTNER),
                OptionSpec::new("For my child or teen", values::FOR_CHILD),
            ],
            |_| StepTarget::Step(FIRST_TIME),
        ),
        QuestionStep::single(
            FIRST_TIME,
            "Is this your first time seeing a therapist?",
            vec![OptionSpec::new("Yes", "yes"), OptionSpec::new("No", "no")],
            |_| StepTarget::Step(MODALITY),
        ),
        QuestionStep::single(
            MODALITY,
            "How would you like to attend sessions?",
            vec![
                OptionSpec::new("Online only", values::MODALITY_ONLINE),
                OptionSpec::new("In-person only", values::MODALITY_IN_PERSON),
                OptionSpec::new("Either online or in-person", values::MODALITY_EITHER),
            ],
            |_| StepTarget::Step(CONCERNS),
        ),
        QuestionStep::multi(
            CONCERNS,
            "What would you like support with?",
            vec![
                OptionSpec::new("Anxiety", "Anxiety"),
                OptionSpec::new("Depression", "Depression"),
                OptionSpec::new("Trauma and PTSD", "Trauma"),
                OptionSpec::new("Relationships", "Relationships"),
                OptionSpec::new("Grief and loss", "Grief"),
                OptionSpec::new("Stress and burnout", "Stress"),
                OptionSpec::new("General Support", values::GENERAL_SUPPORT),
                OptionSpec::new("Couples counselling", values::COUPLES)
                    .disabled_until(is_for_partner),
                OptionSpec::new("Child and adolescent support", values::CHILD_ADOLESCENT)
                    .disabled_until(is_for_child),
            ],
            |_| StepTarget::Step(COMMUNITIES),
        ),
        QuestionStep::multi(
            COMMUNITIES,
            "Do any of these apply to you?",
            vec![
                OptionSpec::new("LGBTQIA+", "LGBTQIA+"),
                OptionSpec::new("Neurodivergent", "Neurodivergent"),
                OptionSpec::new("Culturally and linguistically diverse", "CALD"),
                OptionSpec::new("First Nations", "First Nations"),
                OptionSpec::new("None of these apply", values::NO_COMMUNITY).exclusive(),
            ],
            after_communities,
        ),
        QuestionStep::single(
            COMMUNITY_MATCH,
            "Is it important that your therapist has lived experience of this?",
            vec![
                OptionSpec::new("Yes, this is important", values::LIVED_EXPERIENCE_IMPORTANT),
                OptionSpec::new("It would be nice", values::LIVED_EXPERIENCE_NICE),
                OptionSpec::new("Not needed", values::LIVED_EXPERIENCE_NOT_NEEDED),
            ],
            |_| StepTarget::Step(TIMING),
        ),
        QuestionStep::multi(
            TIMING,
            "When are you available for sessions?",
            vec![
                OptionSpec::new("Weekday daytime", "weekday_day"),
                OptionSpec::new("Weekday evenings", "weekday_evening"),
                OptionSpec::new("Weekends", "weekend"),
                OptionSpec::new("I'm flexible with timing", values::FLEXIBLE_TIMING).exclusive(),
            ],
            |_| StepTarget::Step(URGENCY),
        ),
        QuestionStep::single(
            URGENCY,
            "How soon would you like to start?",
            vec![
                OptionSpec::new("As soon as possible", values::URGENCY_ASAP),
                OptionSpec::new("Within the next few weeks", values::URGENCY_WEEKS),
                OptionSpec::new(
                    "I don't mind waiting for the right therapist",
                    values::URGENCY_WAIT,
                ),
            ],
            |_| StepTarget::Step(GENDER),
        ),
        QuestionStep::multi(
            GENDER,
            "Do you have a preference for your therapist's gender?",
            vec![
                OptionSpec::new("Woman", "woman"),
                OptionSpec::new("Man", "man"),
                OptionSpec::new("Non-binary", "non_binary"),
                OptionSpec::new("No preference/unsure", values::NO_GENDER_PREFERENCE).exclusive(),
            ],
            |_| StepTarget::Step(APPROACH),
        ),
        QuestionStep::multi(
            APPROACH,
            "Is there a therapy approach you prefer?",
            vec![
                OptionSpec::new("Cognitive behavioural therapy (CBT)", "CBT"),
                OptionSpec::new("Mindfulness-based", "Mindfulness"),
                OptionSpec::new("Psychodynamic", "Psychodynamic"),
                OptionSpec::new("Acceptance and commitment therapy (ACT)", "ACT"),
                OptionSpec::new("I'm open to any qualified therapist", values::ANY_APPROACH)
                    .exclusive(),
            ],
            |_| StepTarget::Results,
        ),
    ]
}

/// Looks up a step id of the canonical catalog by slug.
pub fn canonical_step_id(slug: &str) -> Option<StepId> {
    [
        WHO_FOR,
        FIRST_TIME,
        MODALITY,
        CONCERNS,
        COMMUNITIES,
        COMMUNITY_MATCH,
        TIMING,
        URGENCY,
        GENDER,
        APPROACH,
    ]
    .into_iter()
    .find(|id| id.as_str() == slug)
}
