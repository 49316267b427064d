//! The whole UI state as one immutable snapshot.
//!
//! Every user action is a pure method taking `&self` and returning the next
//! snapshot, so the toolbar, canvas and results panel never mutate state in
//! place and each transition can be tested without a window.

use std::fmt;

use super::{AnalysisStatus, BrushState, GridState, PaletteColor};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTransitionError {
    /// The requested transition is not allowed from the current status
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot transition analysis from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for StateTransitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub brush: BrushState,
    pub grid: GridState,
    pub analysis: AnalysisStatus,
    pub toolbar_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            brush: BrushState::default(),
            grid: GridState::default(),
            analysis: AnalysisStatus::Idle,
            toolbar_open: true,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The busy flag: true while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.analysis.is_pending()
    }

    pub fn select_color(&self, color: PaletteColor) -> Self {
        Self {
            brush: self.brush.with_color(color),
            ..self.clone()
        }
    }

    pub fn select_eraser(&self) -> Self {
        Self {
            brush: self.brush.with_eraser(),
            ..self.clone()
        }
    }

    pub fn set_brush_size(&self, size: i64) -> Self {
        Self {
            brush: self.brush.with_size(size),
            ..self.clone()
        }
    }

    pub fn toggle_grid(&self) -> Self {
        Self {
            grid: self.grid.toggled(),
            ..self.clone()
        }
    }

    pub fn set_grid_size(&self, cell_size: i64) -> Self {
        Self {
            grid: self.grid.with_cell_size(cell_size),
            ..self.clone()
        }
    }

    pub fn toggle_toolbar(&self) -> Self {
        Self {
            toolbar_open: !self.toolbar_open,
            ..self.clone()
        }
    }

    /// Analyze was pressed.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::InvalidTransition` while another request is pending.
    pub fn begin_analysis(&self) -> Result<Self, StateTransitionError> {
        self.with_analysis(AnalysisStatus::Pending)
    }

    /// The in-flight request settled.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::InvalidTransition` if no request is pending,
    /// for instance because the canvas was cleared in the meantime.
    pub fn finish_analysis<E: fmt::Display>(
        &self,
        outcome: Result<String, E>,
    ) -> Result<Self, StateTransitionError> {
        let status = match outcome {
            Ok(text) => AnalysisStatus::Success(text),
            Err(error) => AnalysisStatus::Failure(error.to_string()),
        };
        self.with_analysis(status)
    }

    /// Clear always lands in `Idle`, dropping any text or error.
    pub fn clear(&self) -> Self {
        Self {
            analysis: AnalysisStatus::Idle,
            ..self.clone()
        }
    }

    fn with_analysis(&self, status: AnalysisStatus) -> Result<Self, StateTransitionError> {
        if !self.analysis.can_transition_to(&status) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.analysis.name(),
                to: status.name(),
            });
        }
        Ok(Self {
            analysis: status,
            ..self.clone()
        })
    }
}
