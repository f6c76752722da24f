//! QuestionStep and OptionSpec - nodes of the question graph.
//!
//! Each step carries its own `next` rule, a pure function of the answers
//! collected so far. Branching lives in those rules, not in the flow.

use serde::Serialize;
use std::fmt;

use super::AnswerSet;
use crate::domain::foundation::StepId;

/// Predicate over the live answers, used to gate options.
pub type AnswerPredicate = fn(&AnswerSet) -> bool;

/// Picks the step that follows, given the answers so far.
pub type NextStepRule = fn(&AnswerSet) -> StepTarget;

/// Where the flow goes after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum StepTarget {
    Step(StepId),
    /// Terminal: the questionnaire is done and results can be shown.
    Results,
}

impl fmt::Display for StepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepTarget::Step(id) => write!(f, "{}", id),
            StepTarget::Results => write!(f, "RESULTS"),
        }
    }
}

/// How a step hands control to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Advance as soon as a selection satisfies the step.
    OnSelect,
    /// Wait for an explicit continue.
    OnConfirm,
}

/// One selectable option.
#[derive(Clone)]
pub struct OptionSpec {
    label: &'static str,
    value: &'static str,
    exclusive: bool,
    disabled_until: Option<AnswerPredicate>,
}

impl OptionSpec {
    pub fn new(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value,
            exclusive: false,
            disabled_until: None,
        }
    }

    /// Selecting this option clears every other selection on a multi-select step.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Keeps the option disabled until `predicate` holds.
    pub fn disabled_until(mut self, predicate: AnswerPredicate) -> Self {
        self.disabled_until = Some(predicate);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &'static str {
        self.value
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Evaluated against the live answers on every call.
    pub fn is_enabled(&self, answers: &AnswerSet) -> bool {
        self.disabled_until.map_or(true, |gate| gate(answers))
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("exclusive", &self.exclusive)
            .field("gated", &self.disabled_until.is_some())
            .finish()
    }
}

/// One question in the flow.
#[derive(Clone)]
pub struct QuestionStep {
    id: StepId,
    prompt: &'static str,
    options: Vec<OptionSpec>,
    multi_select: bool,
    advance: AdvanceMode,
    min_selections: usize,
    next: NextStepRule,
}

impl QuestionStep {
    /// Single-select step that advances on selection.
    pub fn single(
        id: StepId,
        prompt: &'static str,
        options: Vec<OptionSpec>,
        next: NextStepRule,
    ) -> Self {
        Self {
            id,
            prompt,
            options,
            multi_select: false,
            advance: AdvanceMode::OnSelect,
            min_selections: 1,
            next,
        }
    }

    /// Multi-select step requiring one selection and an explicit continue.
    pub fn multi(
        id: StepId,
        prompt: &'static str,
        options: Vec<OptionSpec>,
        next: NextStepRule,
    ) -> Self {
        Self {
            id,
            prompt,
            options,
            multi_select: true,
            advance: AdvanceMode::OnConfirm,
            min_selections: 1,
            next,
        }
    }

    pub fn with_advance(mut self, advance: AdvanceMode) -> Self {
        self.advance = advance;
        self
    }

    pub fn with_min_selections(mut self, min: usize) -> Self {
        self.min_selections = min;
        self
    }

    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn option(&self, value: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance
    }

    pub fn min_selections(&self) -> usize {
        self.min_selections
    }

    /// Evaluates the branching rule.
    pub fn next_step(&self, answers: &AnswerSet) -> StepTarget {
        (self.next)(answers)
    }
}

impl fmt::Debug for QuestionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionStep")
            .field("id", &self.id)
            .field("prompt", &self.prompt)
            .field("options", &self.options)
            .field("multi_select", &self.multi_select)
            .field("advance", &self.advance)
            .field("min_selections", &self.min_selections)
            .finish()
    }
}
