//! QuestionFlow - the questionnaire state machine.
//!
//! Owns the answers for one session. The position is either a step id or
//! the terminal `RESULTS` marker; reaching `RESULTS` freezes the answers
//! until [`QuestionFlow::reset`].
//!
//! Every mutation is computed against a scratch copy of the answers and
//! committed only once it is known to succeed, so a rejected call leaves
//! the flow exactly as it was.

use serde::Serialize;
use std::sync::Arc;

use super::{AdvanceMode, Answer, AnswerSet, FlowError, QuestionCatalog, QuestionStep, StepTarget};
use crate::domain::foundation::{FlowStatus, StateMachine, StepId};

/// Result of a successful `select_option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The answer was recorded; the flow stays on the step.
    Recorded,
    /// The step auto-advanced to the given target.
    Advanced(StepTarget),
}

/// Display instructions for one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: &'static str,
    pub value: &'static str,
    pub selected: bool,
    pub disabled: bool,
}

/// Display instructions for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub id: StepId,
    pub prompt: &'static str,
    pub multi_select: bool,
    pub requires_confirm: bool,
    pub can_continue: bool,
    pub can_go_back: bool,
    pub step_number: usize,
    pub options: Vec<OptionView>,
}

/// Questionnaire state for one session.
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    catalog: Arc<QuestionCatalog>,
    position: StepTarget,
    status: FlowStatus,
    answers: AnswerSet,
    history: Vec<StepId>,
}

impl QuestionFlow {
    /// Starts a fresh flow at the catalog's first step.
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        let position = StepTarget::Step(catalog.start());
        Self {
            catalog,
            position,
            status: FlowStatus::InProgress,
            answers: AnswerSet::new(),
            history: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn position(&self) -> StepTarget {
        self.position
    }

    /// The current step id, or `None` once at `RESULTS`.
    pub fn current_step_id(&self) -> Option<StepId> {
        match self.position {
            StepTarget::Step(id) => Some(id),
            StepTarget::Results => None,
        }
    }

    pub fn current_step(&self) -> Option<&QuestionStep> {
        self.current_step_id().and_then(|id| self.catalog.step(id))
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == FlowStatus::Completed
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Steps visited before the current position, oldest first.
    pub fn history(&self) -> &[StepId] {
        &self.history
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a selection on the current step.
    ///
    /// Single-select steps replace the prior answer. Multi-select steps
    /// toggle the value; an exclusive option replaces every other selection.
    /// Steps configured with [`AdvanceMode::OnSelect`] advance as soon as the
    /// selection satisfies them.
    ///
    /// # Errors
    ///
    /// - `FlowCompleted` once at `RESULTS`
    /// - `WrongStep` if `step_id` is not the current step
    /// - `UnknownOption` / `OptionDisabled` for invalid values
    pub fn select_option(&mut self, step_id: StepId, value: &str) -> Result<SelectOutcome, FlowError> {
        let catalog = Arc::clone(&self.catalog);
        let step = self.ensure_current(&catalog, step_id)?;

        let option = step.option(value).ok_or_else(|| FlowError::UnknownOption {
            step: step_id,
            value: value.to_string(),
        })?;
        if !option.is_enabled(&self.answers) {
            return Err(FlowError::OptionDisabled {
                step: step_id,
                value: value.to_string(),
            });
        }

        let mut answers = self.answers.clone();
        if step.is_multi_select() {
            let selections = toggle_selection(step, &answers, value);
            if selections.is_empty() {
                answers.remove(step_id);
            } else {
                answers.record(Answer::multi(step_id, selections));
            }
        } else {
            answers.record(Answer::single(step_id, value));
        }

        tracing::debug!(step = %step_id, value, "Option selected");

        let satisfied = enabled_selections(step, &answers).len() >= step.min_selections();
        if step.advance_mode() == AdvanceMode::OnSelect && satisfied {
            let target = self.commit_advance(step, answers)?;
            return Ok(SelectOutcome::Advanced(target));
        }

        self.answers = answers;
        Ok(SelectOutcome::Recorded)
    }

    /// Confirms the current step and moves to the next one.
    ///
    /// Selections whose options have since become disabled are dropped
    /// before the minimum is checked.
    ///
    /// # Errors
    ///
    /// - `FlowCompleted` once at `RESULTS`
    /// - `SelectionRequired` if too few enabled options are selected
    pub fn confirm_step(&mut self) -> Result<StepTarget, FlowError> {
        let catalog = Arc::clone(&self.catalog);
        let step_id = self.current_step_id().ok_or(FlowError::FlowCompleted)?;
        let step = self.ensure_current(&catalog, step_id)?;

        let effective = enabled_selections(step, &self.answers);
        if effective.len() < step.min_selections() {
            return Err(FlowError::SelectionRequired {
                step: step_id,
                required: step.min_selections(),
                selected: effective.len(),
            });
        }

        let mut answers = self.answers.clone();
        let recorded = answers
            .get(step_id)
            .map(|a| a.value().selection_count())
            .unwrap_or(0);
        if effective.len() != recorded {
            if step.is_multi_select() {
                answers.record(Answer::multi(step_id, effective));
            } else if let Some(value) = effective.into_iter().next() {
                answers.record(Answer::single(step_id, value));
            }
        }

        self.commit_advance(step, answers)
    }

    /// Returns to the previously visited step.
    ///
    /// # Errors
    ///
    /// - `FlowCompleted` once at `RESULTS`
    /// - `HistoryEmpty` on the first step
    pub fn go_back(&mut self) -> Result<StepId, FlowError> {
        if !self.status.is_mutable() {
            return Err(FlowError::FlowCompleted);
        }
        let previous = self.history.pop().ok_or(FlowError::HistoryEmpty)?;
        self.position = StepTarget::Step(previous);
        tracing::debug!(step = %previous, "Went back");
        Ok(previous)
    }

    /// Discards all answers and returns to the first step.
    pub fn reset(&mut self) {
        if let Ok(status) = self.status.transition_to(FlowStatus::InProgress) {
            self.status = status;
        }
        self.answers.clear();
        self.history.clear();
        self.position = StepTarget::Step(self.catalog.start());
        tracing::debug!("Questionnaire reset");
    }

    /// True if `confirm_step` would currently succeed.
    pub fn can_confirm(&self) -> bool {
        self.current_step()
            .filter(|_| self.status.is_mutable())
            .map(|step| enabled_selections(step, &self.answers).len() >= step.min_selections())
            .unwrap_or(false)
    }

    /// Builds display instructions for the current step.
    ///
    /// Disabled flags are evaluated against the live answers on every call.
    pub fn render_step(&self) -> Result<StepView, FlowError> {
        let step = self.current_step().ok_or(FlowError::FlowCompleted)?;
        let options = step
            .options()
            .iter()
            .map(|option| OptionView {
                label: option.label(),
                value: option.value(),
                selected: self.answers.has_value(step.id(), option.value()),
                disabled: !option.is_enabled(&self.answers),
            })
            .collect();

        Ok(StepView {
            id: step.id(),
            prompt: step.prompt(),
            multi_select: step.is_multi_select(),
            requires_confirm: step.advance_mode() == AdvanceMode::OnConfirm,
            can_continue: self.can_confirm(),
            can_go_back: !self.history.is_empty(),
            step_number: self.history.len() + 1,
            options,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_current<'c>(
        &self,
        catalog: &'c QuestionCatalog,
        step_id: StepId,
    ) -> Result<&'c QuestionStep, FlowError> {
        if !self.status.is_mutable() {
            return Err(FlowError::FlowCompleted);
        }
        if self.position != StepTarget::Step(step_id) {
            return Err(FlowError::WrongStep {
                expected: self.position.to_string(),
                actual: step_id,
            });
        }
        catalog.step(step_id).ok_or(FlowError::UnknownStep(step_id))
    }

    /// Resolves the next target against `answers` and commits everything at once.
    fn commit_advance(&mut self, step: &QuestionStep, answers: AnswerSet) -> Result<StepTarget, FlowError> {
        let target = step.next_step(&answers);
        if let StepTarget::Step(next) = target {
            if !self.catalog.contains(next) {
                return Err(FlowError::UnknownStep(next));
            }
        }
        let status = match target {
            StepTarget::Results => self
                .status
                .transition_to(FlowStatus::Completed)
                .map_err(|_| FlowError::FlowCompleted)?,
            StepTarget::Step(_) => self.status,
        };

        self.answers = answers;
        self.history.push(step.id());
        self.position = target;
        self.status = status;

        if target == StepTarget::Results {
            self.answers.retain_questions(&self.history);
            tracing::info!(
                steps = self.history.len(),
                answers = self.answers.len(),
                "Questionnaire completed"
            );
        } else {
            tracing::debug!(from = %step.id(), to = %target, "Advanced");
        }
        Ok(target)
    }
}

/// Values of `step`'s answer whose options are still enabled.
fn enabled_selections(step: &QuestionStep, answers: &AnswerSet) -> Vec<String> {
    answers
        .values(step.id())
        .into_iter()
        .filter(|v| step.option(v).map_or(false, |o| o.is_enabled(answers)))
        .map(str::to_string)
        .collect()
}

fn toggle_selection(step: &QuestionStep, answers: &AnswerSet, value: &str) -> Vec<String> {
    let mut current: Vec<String> = answers
        .values(step.id())
        .into_iter()
        .map(str::to_string)
        .collect();

    if current.iter().any(|v| v == value) {
        current.retain(|v| v != value);
        return current;
    }

    let exclusive = step.option(value).map_or(false, |o| o.is_exclusive());
    if exclusive {
        return vec![value.to_string()];
    }

    current.retain(|v| !step.option(v).map_or(false, |o| o.is_exclusive()));
    current.push(value.to_string());
    current
}
