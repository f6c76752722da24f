//! MatchEngine - filters and ranks the roster against a completed answer set.
//!
//! Two passes:
//! 1. Filter: drop therapists that conflict with hard requirements.
//! 2. Score: sum weighted signals, then stable-sort by score descending so
//!    ties keep roster order.

use serde::Serialize;

use super::candidate::Candidate;
use super::criteria::MatchCriteria;
use super::roster::Roster;
use super::therapist::{tag_key, Modality, TherapistProfile};
use super::weights::ScoringWeights;
use crate::domain::foundation::TherapistId;
use crate::domain::questionnaire::AnswerSet;

/// Default number of candidates shown to the user.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Why a therapist was filtered out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    ModalityConflict { wanted: Modality, offered: Modality },
    NoSpecialties,
    NoSpecialtyOverlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub therapist_id: TherapistId,
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

/// Full evaluation of a roster: every survivor, ranked, plus every exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub candidates: Vec<Candidate>,
    pub exclusions: Vec<Exclusion>,
}

impl MatchReport {
    /// Top `max_results` candidates.
    pub fn top(&self, max_results: usize) -> &[Candidate] {
        &self.candidates[..self.candidates.len().min(max_results)]
    }
}

/// Stateless ranking engine.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    weights: ScoringWeights,
    require_specialty_overlap: bool,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl MatchEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            require_specialty_overlap: true,
        }
    }

    /// When false, therapists sharing no specialty with the user's concerns
    /// stay in the pool with a lower score.
    pub fn with_specialty_overlap_required(mut self, required: bool) -> Self {
        self.require_specialty_overlap = required;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Ranks the roster and keeps at most `max_results` candidates.
    pub fn rank(&self, answers: &AnswerSet, roster: &Roster, max_results: usize) -> Vec<Candidate> {
        let mut report = self.evaluate(answers, roster);
        report.candidates.truncate(max_results);
        report.candidates
    }

    /// Filters and scores the whole roster without truncating.
    pub fn evaluate(&self, answers: &AnswerSet, roster: &Roster) -> MatchReport {
        let criteria = MatchCriteria::from_answers(answers);
        let mut candidates = Vec::new();
        let mut exclusions = Vec::new();

        for profile in roster.profiles() {
            match self.score(&criteria, profile) {
                Ok(candidate) => candidates.push(candidate),
                Err(reason) => exclusions.push(Exclusion {
                    therapist_id: profile.id().clone(),
                    reason,
                }),
            }
        }

        // sort_by is stable: equal scores keep roster order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            roster = roster.len(),
            candidates = candidates.len(),
            excluded = exclusions.len(),
            "Roster evaluated"
        );

        MatchReport {
            candidates,
            exclusions,
        }
    }

    /// Scores one profile, or reports why it is excluded.
    pub fn score(
        &self,
        criteria: &MatchCriteria,
        profile: &TherapistProfile,
    ) -> Result<Candidate, ExclusionReason> {
        let wanted = criteria.required_modality();
        if !profile.modality().satisfies(wanted) {
            return Err(ExclusionReason::ModalityConflict {
                wanted,
                offered: profile.modality(),
            });
        }

        if profile.specialties().is_empty() {
            return Err(ExclusionReason::NoSpecialties);
        }

        let matched_specialties = shared(profile.specialties(), &criteria.concerns);
        if self.require_specialty_overlap
            && !criteria.concerns.is_empty()
            && matched_specialties.is_empty()
        {
            return Err(ExclusionReason::NoSpecialtyOverlap);
        }

        let w = &self.weights;
        let mut score = w.specialty_match.saturating_mul(count(&matched_specialties));

        if criteria.urgency.accepts(profile.availability()) {
            score = score.saturating_add(w.availability_alignment);
        }

        let communities = count(&shared(profile.communities(), &criteria.communities));
        let community_points = w
            .community_match
            .saturating_mul(criteria.lived_experience.multiplier())
            .saturating_mul(communities);
        score = score.saturating_add(community_points);

        if let Some(gender) = profile.gender() {
            if criteria.genders.contains(&tag_key(gender)) {
                score = score.saturating_add(w.gender_match);
            }
        }

        let approaches = count(&shared(profile.approaches(), &criteria.approaches));
        score = score.saturating_add(w.approach_match.saturating_mul(approaches));

        Ok(Candidate {
            profile: profile.clone(),
            score,
            matched_specialties,
        })
    }
}

/// Profile tags whose key appears in `wanted`, in profile order.
fn shared(tags: &[String], wanted: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|t| wanted.contains(&tag_key(t)))
        .cloned()
        .collect()
}

fn count(items: &[String]) -> u32 {
    u32::try_from(items.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::therapist::Availability;
    use crate::domain::questionnaire::canonical::{steps, values};
    use crate::domain::questionnaire::Answer;

    fn profile(id: &str, modality: Modality, specialties: &[&str]) -> TherapistProfile {
        TherapistProfile::new(TherapistId::new(id).unwrap(), id, modality, format!("{}.jpg", id))
            .unwrap()
            .with_specialties(specialties.iter().copied())
    }

    fn answers(modality: &str, concerns: &[&str]) -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.record(Answer::single(steps::MODALITY, modality));
        answers.record(Answer::multi(
            steps::CONCERNS,
            concerns.iter().map(|c| c.to_string()).collect(),
        ));
        answers
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.profile.id().as_str()).collect()
    }

    #[test]
    fn online_request_excludes_in_person_only_therapists() {
        let roster = Roster::new(vec![
            profile("a", Modality::InPerson, &["Anxiety"]),
            profile("b", Modality::Online, &["Anxiety"]),
            profile("c", Modality::Either, &["Anxiety"]),
        ]);
        let engine = MatchEngine::default();

        let report = engine.evaluate(&answers(values::MODALITY_ONLINE, &["Anxiety"]), &roster);

        assert_eq!(ids(&report.candidates), vec!["b", "c"]);
        assert_eq!(
            report.exclusions[0].reason,
            ExclusionReason::ModalityConflict {
                wanted: Modality::Online,
                offered: Modality::InPerson
            }
        );
    }

    #[test]
    fn modality_conflict_with_whole_roster_gives_empty_result() {
        let roster = Roster::new(vec![
            profile("a", Modality::InPerson, &["Anxiety"]),
            profile("b", Modality::InPerson, &["Trauma"]),
        ]);
        let ranked = MatchEngine::default().rank(
            &answers(values::MODALITY_ONLINE, &["Anxiety"]),
            &roster,
            DEFAULT_MAX_RESULTS,
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn more_shared_specialties_rank_higher() {
        let roster = Roster::new(vec![
            profile("one", Modality::Either, &["Anxiety"]),
            profile("two", Modality::Either, &["Anxiety", "Depression"]),
        ]);
        let ranked = MatchEngine::default().rank(
            &answers(values::MODALITY_EITHER, &["Anxiety", "Depression"]),
            &roster,
            DEFAULT_MAX_RESULTS,
        );
        assert_eq!(ids(&ranked), vec!["two", "one"]);
        assert_eq!(ranked[0].matched_specialties, vec!["Anxiety", "Depression"]);
    }

    #[test]
    fn ties_keep_roster_order() {
        let roster = Roster::new(vec![
            profile("first", Modality::Either, &["Grief"]),
            profile("second", Modality::Either, &["Grief"]),
            profile("third", Modality::Either, &["Grief"]),
        ]);
        let ranked = MatchEngine::default().rank(
            &answers(values::MODALITY_EITHER, &["Grief"]),
            &roster,
            10,
        );
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn profile_without_specialties_is_excluded() {
        let roster = Roster::new(vec![profile("empty", Modality::Either, &[])]);
        let report = MatchEngine::default().evaluate(&AnswerSet::new(), &roster);
        assert!(report.candidates.is_empty());
        assert_eq!(report.exclusions[0].reason, ExclusionReason::NoSpecialties);
    }

    #[test]
    fn no_overlap_excluded_unless_relaxed() {
        let roster = Roster::new(vec![profile("t", Modality::Either, &["Trauma"])]);
        let a = answers(values::MODALITY_EITHER, &["Anxiety"]);

        assert!(MatchEngine::default().rank(&a, &roster, 3).is_empty());

        let relaxed = MatchEngine::default().with_specialty_overlap_required(false);
        let ranked = relaxed.rank(&a, &roster, 3);
        assert_eq!(ids(&ranked), vec!["t"]);
        assert!(ranked[0].matched_specialties.is_empty());
    }

    #[test]
    fn truncates_to_max_results() {
        let roster = Roster::new(
            (0..6)
                .map(|i| profile(&format!("t{}", i), Modality::Either, &["Stress"]))
                .collect(),
        );
        let ranked = MatchEngine::default().rank(
            &answers(values::MODALITY_EITHER, &["Stress"]),
            &roster,
            DEFAULT_MAX_RESULTS,
        );
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn important_lived_experience_doubles_community_bonus() {
        let roster = Roster::new(vec![profile("c", Modality::Either, &["Anxiety"])
            .with_communities(["LGBTQIA+"])]);
        let mut a = answers(values::MODALITY_EITHER, &["Anxiety"]);
        a.record(Answer::multi(steps::COMMUNITIES, vec!["LGBTQIA+".into()]));
        let engine = MatchEngine::default();

        a.record(Answer::single(steps::COMMUNITY_MATCH, values::LIVED_EXPERIENCE_NICE));
        let nice = engine.rank(&a, &roster, 1)[0].score;

        a.record(Answer::single(steps::COMMUNITY_MATCH, values::LIVED_EXPERIENCE_IMPORTANT));
        let important = engine.rank(&a, &roster, 1)[0].score;

        let weight = engine.weights().community_match;
        assert_eq!(important - nice, weight);
    }

    #[test]
    fn urgent_request_prefers_immediate_availability() {
        let roster = Roster::new(vec![
            profile("later", Modality::Either, &["Anxiety"]).with_availability(Availability::Waitlist),
            profile("now", Modality::Either, &["Anxiety"]).with_availability(Availability::Immediate),
        ]);
        let mut a = answers(values::MODALITY_EITHER, &["Anxiety"]);
        a.record(Answer::single(steps::URGENCY, values::URGENCY_ASAP));

        let ranked = MatchEngine::default().rank(&a, &roster, 3);
        assert_eq!(ids(&ranked), vec!["now", "later"]);
    }

    #[test]
    fn gender_and_approach_preferences_add_points() {
        let roster = Roster::new(vec![
            profile("plain", Modality::Either, &["Anxiety"]),
            profile("fit", Modality::Either, &["Anxiety"])
                .with_gender("woman")
                .with_approaches(["CBT"]),
        ]);
        let mut a = answers(values::MODALITY_EITHER, &["Anxiety"]);
        a.record(Answer::multi(steps::GENDER, vec!["woman".into()]));
        a.record(Answer::multi(steps::APPROACH, vec!["CBT".into()]));

        let ranked = MatchEngine::default().rank(&a, &roster, 3);
        assert_eq!(ids(&ranked), vec!["fit", "plain"]);
        let w = ScoringWeights::default();
        assert_eq!(ranked[0].score - ranked[1].score, w.gender_match + w.approach_match);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let roster = Roster::new(vec![
            profile("a", Modality::Either, &["Anxiety", "Stress"]),
            profile("b", Modality::Online, &["Stress"]),
            profile("c", Modality::Either, &["Anxiety"]),
        ]);
        let a = answers(values::MODALITY_ONLINE, &["Stress", "Anxiety"]);
        let engine = MatchEngine::default();
        assert_eq!(engine.evaluate(&a, &roster), engine.evaluate(&a, &roster));
    }
}
