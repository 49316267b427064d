use thiserror::Error;

/// Errors surfaced by the analysis pipeline. Every variant's `Display` is the
/// exact text shown in the results panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The drawing surface has not been laid out yet
    #[error("Canvas not initialized")]
    NotInitialized,

    /// The bitmap could not be encoded, or the data URL carried no payload
    #[error("Invalid image data format")]
    InvalidImageFormat,

    /// Transport or provider failure, carrying the underlying message
    #[error("Failed to analyze drawing: {0}")]
    AnalysisFailed(String),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        // reqwest includes the full URL in its messages, and the URL carries the key
        AnalysisError::AnalysisFailed(error.without_url().to_string())
    }
}
