//! Questionnaire module - question graph, answers and the flow state machine.
//!
//! # Components
//!
//! - `AnswerSet` - answers keyed by question id, later answers overwrite
//! - `QuestionStep` / `OptionSpec` - graph nodes with pure branching rules
//! - `QuestionCatalog` - validated step table
//! - `QuestionFlow` - navigation (select, confirm, back, reset) for one session
//! - `canonical` - the Therapair questionnaire itself

mod answer;
pub mod canonical;
mod catalog;
mod errors;
mod flow;
mod step;

pub use answer::{Answer, AnswerSet, AnswerValue};
pub use catalog::QuestionCatalog;
pub use errors::FlowError;
pub use flow::{OptionView, QuestionFlow, SelectOutcome, StepView};
pub use step::{AdvanceMode, AnswerPredicate, NextStepRule, OptionSpec, QuestionStep, StepTarget};
