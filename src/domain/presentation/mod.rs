//! Presentation module - display records for the results page.

mod results;

pub use results::{PresenterConfig, ResultsPresenter, ResultsView, TherapistCard};
