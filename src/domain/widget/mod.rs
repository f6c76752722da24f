//! Widget module - wires questionnaire, matching and presentation together
//! for one browser session.

mod session;

pub use session::{Widget, WidgetSession, WidgetView};
