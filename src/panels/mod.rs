mod canvas_panel;
mod results_panel;
mod toolbar;

pub use canvas_panel::{canvas_panel, CanvasAction, MIN_CANVAS_SIZE};
pub use results_panel::{results_panel, ResultView, PLACEHOLDER_TEXT, RESULTS_WIDTH};
pub use toolbar::toolbar_panel;
