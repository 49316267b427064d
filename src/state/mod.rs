mod analysis_status;
mod brush;
mod ui_state;

pub use analysis_status::AnalysisStatus;
pub use brush::{
    BrushColor, BrushState, GridState, PaletteColor,
    BACKGROUND_COLOR, DEFAULT_BRUSH_SIZE, DEFAULT_GRID_SIZE, GRID_SIZE_STEP,
    MAX_BRUSH_SIZE, MAX_GRID_SIZE, MIN_BRUSH_SIZE, MIN_GRID_SIZE,
    clamp_brush_size, snap_grid_size,
};
pub use ui_state::{StateTransitionError, UiState};
