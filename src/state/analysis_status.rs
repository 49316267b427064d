/// Lifecycle of the most recent analysis request.
///
/// ```text
///              Analyze              response
///   ┌──────┐ ─────────► ┌─────────┐ ─────────► ┌──────────────────┐
///   │ Idle │            │ Pending │            │ Success/Failure  │
///   └──────┘ ◄───────── └─────────┘            └────────┬─────────┘
///       ▲      Clear                   Analyze again    │
///       │                         (back to Pending) ◄───┤
///       └───────────────── Clear ───────────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

impl AnalysisStatus {
    /// Validates whether a transition to the new status is allowed
    pub fn can_transition_to(&self, new_status: &AnalysisStatus) -> bool {
        match (self, new_status) {
            // Clear is always allowed
            (_, AnalysisStatus::Idle) => true,

            // A request can only start when none is in flight
            (AnalysisStatus::Pending, AnalysisStatus::Pending) => false,
            (_, AnalysisStatus::Pending) => true,

            // Outcomes only ever answer a pending request
            (AnalysisStatus::Pending, AnalysisStatus::Success(_) | AnalysisStatus::Failure(_)) => true,

            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisStatus::Idle => "Idle",
            AnalysisStatus::Pending => "Pending",
            AnalysisStatus::Success(_) => "Success",
            AnalysisStatus::Failure(_) => "Failure",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisStatus::Pending)
    }

    pub fn success_text(&self) -> Option<&str> {
        match self {
            AnalysisStatus::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AnalysisStatus::Failure(message) => Some(message),
            _ => None,
        }
    }
}
