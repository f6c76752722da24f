//! Answer and AnswerSet - the responses collected by the questionnaire.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::StepId;

/// Value recorded for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Single-select step: exactly one option value.
    Single(String),
    /// Multi-select step: selected option values in selection order.
    Multi(Vec<String>),
}

impl AnswerValue {
    /// Returns the selected values as a slice-like iterator.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AnswerValue::Single(v) => vec![v.as_str()],
            AnswerValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if `value` is among the selections.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            AnswerValue::Single(v) => v == value,
            AnswerValue::Multi(vs) => vs.iter().any(|v| v == value),
        }
    }

    /// Number of selected values.
    pub fn selection_count(&self) -> usize {
        match self {
            AnswerValue::Single(_) => 1,
            AnswerValue::Multi(vs) => vs.len(),
        }
    }
}

/// One recorded answer. Immutable once built; re-answering replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    question_id: StepId,
    value: AnswerValue,
}

impl Answer {
    /// Answer to a single-select question.
    pub fn single(question_id: StepId, value: impl Into<String>) -> Self {
        Self {
            question_id,
            value: AnswerValue::Single(value.into()),
        }
    }

    /// Answer to a multi-select question.
    pub fn multi(question_id: StepId, values: Vec<String>) -> Self {
        Self {
            question_id,
            value: AnswerValue::Multi(values),
        }
    }

    pub fn question_id(&self) -> StepId {
        self.question_id
    }

    pub fn value(&self) -> &AnswerValue {
        &self.value
    }
}

/// Answers keyed by question id.
///
/// # Invariants
///
/// - At most one entry per question id; recording again overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: BTreeMap<StepId, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, returning the one it replaced.
    pub fn record(&mut self, answer: Answer) -> Option<Answer> {
        self.entries.insert(answer.question_id, answer)
    }

    pub fn get(&self, question_id: StepId) -> Option<&Answer> {
        self.entries.get(&question_id)
    }

    /// Selected values for a question; empty when unanswered.
    pub fn values(&self, question_id: StepId) -> Vec<&str> {
        self.get(question_id)
            .map(|a| a.value.values())
            .unwrap_or_default()
    }

    /// The single selected value, if the question was answered.
    pub fn first_value(&self, question_id: StepId) -> Option<&str> {
        self.values(question_id).into_iter().next()
    }

    /// True if `value` was selected for `question_id`.
    pub fn has_value(&self, question_id: StepId, value: &str) -> bool {
        self.get(question_id)
            .map(|a| a.value.contains(value))
            .unwrap_or(false)
    }

    pub fn contains(&self, question_id: StepId) -> bool {
        self.entries.contains_key(&question_id)
    }

    pub fn remove(&mut self, question_id: StepId) -> Option<Answer> {
        self.entries.remove(&question_id)
    }

    /// Drops every answer whose question is not in `keep`.
    pub fn retain_questions(&mut self, keep: &[StepId]) {
        self.entries.retain(|id, _| keep.contains(id));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.entries.values()
    }

    /// JSON object of question id to value, as submitted in `User_Responses`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(id, answer)| {
                (
                    id.as_str().to_string(),
                    serde_json::to_value(&answer.value).unwrap_or(serde_json::Value::Null),
                )
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}
