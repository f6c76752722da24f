//! QuestionCatalog - the validated table of question steps.

use std::collections::HashSet;

use super::QuestionStep;
use crate::domain::foundation::{DomainError, ErrorCode, StepId, ValidationError};

/// Immutable set of question steps plus the entry point.
///
/// # Invariants
///
/// - Step ids are unique.
/// - Every step has at least one option and unique option values.
/// - `min_selections` is reachable (≤ option count, ≥ 1).
/// - The start step exists.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    steps: Vec<QuestionStep>,
    start: StepId,
}

impl QuestionCatalog {
    /// Builds a catalog, validating the step table.
    pub fn new(steps: Vec<QuestionStep>, start: StepId) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id()) {
                return Err(DomainError::validation(
                    "steps",
                    format!("Duplicate step id '{}'", step.id()),
                ));
            }
            if step.options().is_empty() {
                return Err(ValidationError::empty_field(format!("{}.options", step.id())).into());
            }
            let mut values = HashSet::new();
            for option in step.options() {
                if !values.insert(option.value()) {
                    return Err(DomainError::validation(
                        "options",
                        format!("Duplicate option '{}' in step '{}'", option.value(), step.id()),
                    ));
                }
            }
            let max = if step.is_multi_select() { step.options().len() } else { 1 };
            if step.min_selections() == 0 || step.min_selections() > max {
                return Err(ValidationError::out_of_range(
                    format!("{}.min_selections", step.id()),
                    1,
                    i32::try_from(max).unwrap_or(i32::MAX),
                    i32::try_from(step.min_selections()).unwrap_or(i32::MAX),
                )
                .into());
            }
        }

        if !seen.contains(&start) {
            return Err(DomainError::new(
                ErrorCode::StepNotFound,
                format!("Start step '{}' is not in the catalog", start),
            ));
        }

        Ok(Self { steps, start })
    }

    pub fn start(&self) -> StepId {
        self.start
    }

    pub fn step(&self, id: StepId) -> Option<&QuestionStep> {
        self.steps.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.step(id).is_some()
    }

    pub fn steps(&self) -> &[QuestionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::{OptionSpec, StepTarget};

    const A: StepId = StepId::new("a");
    const B: StepId = StepId::new("b");

    fn yes_no(id: StepId) -> QuestionStep {
        QuestionStep::single(
            id,
            "Yes or no?",
            vec![OptionSpec::new("Yes", "yes"), OptionSpec::new("No", "no")],
            |_| StepTarget::Results,
        )
    }

    #[test]
    fn accepts_valid_table() {
        let catalog = QuestionCatalog::new(vec![yes_no(A), yes_no(B)], A).unwrap();
        assert_eq!(catalog.start(), A);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(B));
    }

    #[test]
    fn rejects_duplicate_step_ids() {
        let err = QuestionCatalog::new(vec![yes_no(A), yes_no(A)], A).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn rejects_missing_start() {
        let err = QuestionCatalog::new(vec![yes_no(A)], B).unwrap_err();
        assert_eq!(err.code, ErrorCode::StepNotFound);
    }

    #[test]
    fn rejects_step_without_options() {
        let empty = QuestionStep::single(A, "?", vec![], |_| StepTarget::Results);
        let err = QuestionCatalog::new(vec![empty], A).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn rejects_duplicate_option_values() {
        let step = QuestionStep::single(
            A,
            "?",
            vec![OptionSpec::new("Yes", "yes"), OptionSpec::new("Sure", "yes")],
            |_| StepTarget::Results,
        );
        assert!(QuestionCatalog::new(vec![step], A).is_err());
    }

    #[test]
    fn rejects_unreachable_minimum() {
        let step = QuestionStep::multi(A, "?", vec![OptionSpec::new("Yes", "yes")], |_| {
            StepTarget::Results
        })
        .with_min_selections(2);
        let err = QuestionCatalog::new(vec![step], A).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[test]
    fn oversized_minimum_reports_saturated_count() {
        let step = QuestionStep::single(A, "?", vec![OptionSpec::new("Yes", "yes")], |_| {
            StepTarget::Results
        })
        .with_min_selections(usize::MAX);
        let err = QuestionCatalog::new(vec![step], A).unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(
            err.message,
            format!("Field 'a.min_selections' must be between 1 and 1, got {}", i32::MAX)
        );
    }
}
