//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, state machine, errors)
//! - `assets` - Environment-aware photo path resolution
//! - `questionnaire` - Question graph, answers and the flow state machine
//! - `matching` - Therapist roster and the ranking engine
//! - `presentation` - Result cards for the results page
//! - `booking` - Booking validation and notification composition
//! - `widget` - One browser session, questionnaire through results

pub mod assets;
pub mod booking;
pub mod foundation;
pub mod matching;
pub mod presentation;
pub mod questionnaire;
pub mod widget;
