//! WidgetSession - one questionnaire run, from first question to results.
//!
//! `Widget` holds the read-only parts shared by every session (catalog,
//! roster, engine, presenter). Each browser tab gets its own
//! `WidgetSession`; sessions never share answers.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::assets::RuntimeEnvironment;
use crate::domain::booking::BookingForm;
use crate::domain::foundation::{SessionId, StepId, TherapistId};
use crate::domain::matching::{Candidate, MatchEngine, Roster};
use crate::domain::presentation::{ResultsPresenter, ResultsView};
use crate::domain::questionnaire::{
    FlowError, QuestionCatalog, QuestionFlow, SelectOutcome, StepTarget, StepView,
};

/// Shared, immutable widget services.
#[derive(Debug)]
pub struct Widget {
    catalog: Arc<QuestionCatalog>,
    roster: Arc<Roster>,
    engine: MatchEngine,
    presenter: ResultsPresenter,
    max_results: usize,
}

impl Widget {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        roster: Arc<Roster>,
        engine: MatchEngine,
        presenter: ResultsPresenter,
        max_results: usize,
    ) -> Self {
        Self {
            catalog,
            roster,
            engine,
            presenter,
            max_results,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Starts a fresh session for a page loaded in `env`.
    pub fn start_session(self: &Arc<Self>, env: RuntimeEnvironment) -> WidgetSession {
        let session = WidgetSession {
            id: SessionId::new(),
            widget: Arc::clone(self),
            flow: QuestionFlow::new(Arc::clone(&self.catalog)),
            env,
        };
        tracing::debug!(session_id = %session.id, "Widget session started");
        session
    }
}

/// What the widget should display right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum WidgetView {
    Question { step: StepView },
    Results { results: ResultsView },
}

/// Per-tab questionnaire state.
#[derive(Debug, Clone)]
pub struct WidgetSession {
    id: SessionId,
    widget: Arc<Widget>,
    flow: QuestionFlow,
    env: RuntimeEnvironment,
}

impl WidgetSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn flow(&self) -> &QuestionFlow {
        &self.flow
    }

    pub fn environment(&self) -> &RuntimeEnvironment {
        &self.env
    }

    pub fn select(&mut self, step: StepId, value: &str) -> Result<SelectOutcome, FlowError> {
        self.flow.select_option(step, value)
    }

    pub fn confirm(&mut self) -> Result<StepTarget, FlowError> {
        self.flow.confirm_step()
    }

    pub fn back(&mut self) -> Result<StepId, FlowError> {
        self.flow.go_back()
    }

    pub fn reset(&mut self) {
        self.flow.reset();
    }

    /// Ranked candidates; empty until the questionnaire is complete.
    pub fn candidates(&self) -> Vec<Candidate> {
        if !self.flow.is_complete() {
            return Vec::new();
        }
        self.widget
            .engine
            .rank(self.flow.answers(), &self.widget.roster, self.widget.max_results)
    }

    /// The current question, or the results page once complete.
    pub fn view(&self) -> Result<WidgetView, FlowError> {
        if self.flow.is_complete() {
            let results = self.widget.presenter.present(&self.candidates(), &self.env);
            tracing::info!(
                session_id = %self.id,
                matches = results.cards().len(),
                "Results shown"
            );
            return Ok(WidgetView::Results { results });
        }
        Ok(WidgetView::Question {
            step: self.flow.render_step()?,
        })
    }

    /// Booking form fields the widget fills in for a chosen therapist.
    ///
    /// Contact fields are left empty for the user. Returns `None` before the
    /// questionnaire is complete or when the therapist is not a current match.
    pub fn booking_prefill(&self, therapist: &TherapistId) -> Option<BookingForm> {
        let candidate = self
            .candidates()
            .into_iter()
            .find(|c| c.profile.id() == therapist)?;

        let specialty = candidate
            .matched_specialties
            .first()
            .or_else(|| candidate.profile.specialties().first())
            .cloned();

        Some(BookingForm {
            selected_therapist: Some(candidate.profile.name().to_string()),
            selected_specialty: specialty,
            preferences_summary: Some(self.preferences_summary()),
            user_responses: Some(self.flow.answers().to_json().to_string()),
            ..Default::default()
        })
    }

    /// Option labels of every answered step, in the order visited.
    pub fn preferences_summary(&self) -> String {
        let catalog = self.widget.catalog();
        let answers = self.flow.answers();
        self.flow
            .history()
            .iter()
            .filter_map(|id| {
                let step = catalog.step(*id)?;
                let labels: Vec<&str> = answers
                    .values(*id)
                    .into_iter()
                    .filter_map(|v| step.option(v).map(|o| o.label()))
                    .collect();
                (!labels.is_empty()).then(|| labels.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{Modality, TherapistProfile};
    use crate::domain::questionnaire::canonical::{canonical_catalog, steps, values};

    fn widget() -> Arc<Widget> {
        let profile = |id: &str, specialties: &[&str]| {
            TherapistProfile::new(TherapistId::new(id).unwrap(), id, Modality::Either, format!("{}.jpg", id))
                .unwrap()
                .with_specialties(specialties.iter().copied())
        };
        let roster = Roster::new(vec![
            profile("adam", &["General Support", "Anxiety"]),
            profile("nicki", &["Trauma"]),
        ]);
        Arc::new(Widget::new(
            Arc::new(canonical_catalog().unwrap()),
            Arc::new(roster),
            MatchEngine::default(),
            ResultsPresenter::default(),
            3,
        ))
    }

    fn complete(session: &mut WidgetSession) {
        session.select(steps::WHO_FOR, values::FOR_MYSELF).unwrap();
        session.select(steps::FIRST_TIME, "yes").unwrap();
        session.select(steps::MODALITY, values::MODALITY_EITHER).unwrap();
        session.select(steps::CONCERNS, values::GENERAL_SUPPORT).unwrap();
        session.confirm().unwrap();
        session.select(steps::COMMUNITIES, values::NO_COMMUNITY).unwrap();
        session.confirm().unwrap();
        session.select(steps::TIMING, values::FLEXIBLE_TIMING).unwrap();
        session.confirm().unwrap();
        session.select(steps::URGENCY, values::URGENCY_WAIT).unwrap();
        session.select(steps::GENDER, values::NO_GENDER_PREFERENCE).unwrap();
        session.confirm().unwrap();
        session.select(steps::APPROACH, values::ANY_APPROACH).unwrap();
        session.confirm().unwrap();
    }

    #[test]
    fn shows_first_question_until_complete() {
        let session = widget().start_session(RuntimeEnvironment::local_file());
        match session.view().unwrap() {
            WidgetView::Question { step } => assert_eq!(step.id, steps::WHO_FOR),
            other => panic!("expected question, got {:?}", other),
        }
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn completed_session_shows_matching_cards() {
        let mut session = widget().start_session(RuntimeEnvironment::local_file());
        complete(&mut session);

        match session.view().unwrap() {
            WidgetView::Results { results } => {
                let names: Vec<&str> = results.cards().iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["adam"]);
                assert_eq!(results.cards()[0].photo_url, "images/resized/adam.jpg");
            }
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[test]
    fn sessions_do_not_share_answers() {
        let widget = widget();
        let mut first = widget.start_session(RuntimeEnvironment::local_file());
        let second = widget.start_session(RuntimeEnvironment::local_file());

        first.select(steps::WHO_FOR, values::FOR_MYSELF).unwrap();

        assert_eq!(first.flow().answers().len(), 1);
        assert!(second.flow().answers().is_empty());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn booking_prefill_carries_selection_and_answers() {
        let mut session = widget().start_session(RuntimeEnvironment::local_file());
        complete(&mut session);

        let form = session
            .booking_prefill(&TherapistId::new("adam").unwrap())
            .unwrap();
        assert_eq!(form.selected_therapist.as_deref(), Some("adam"));
        assert_eq!(form.selected_specialty.as_deref(), Some("General Support"));
        assert!(form.full_name.is_none());
        let summary = form.preferences_summary.unwrap();
        assert!(summary.starts_with("For myself; Yes; Either online or in-person"));

        let responses: serde_json::Value =
            serde_json::from_str(&form.user_responses.unwrap()).unwrap();
        assert_eq!(responses["who_for"], "myself");
    }

    #[test]
    fn booking_prefill_unavailable_for_non_match() {
        let mut session = widget().start_session(RuntimeEnvironment::local_file());
        complete(&mut session);
        assert!(session
            .booking_prefill(&TherapistId::new("nicki").unwrap())
            .is_none());
    }

    #[test]
    fn reset_returns_to_questions() {
        let mut session = widget().start_session(RuntimeEnvironment::local_file());
        complete(&mut session);
        session.reset();
        assert!(matches!(session.view().unwrap(), WidgetView::Question { .. }));
    }
}
