use thiserror::Error;

/// Failure taxonomy for the summarization service.
///
/// `EmptyInput`, `EngineUnavailable` and `SummarizationFailure` are the
/// outcomes a request can surface over HTTP (400/503/500). The model-load
/// variants are internal to the engine adapter: they are recorded in the
/// engine's `Failed` state and logged, but cross the adapter boundary only
/// as `EngineUnavailable`.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Text cannot be empty")]
    EmptyInput,

    #[error("Summarization model not loaded")]
    EngineUnavailable,

    #[error("Failed to generate summary: {0}")]
    SummarizationFailure(String),

    #[error("Model load timed out after {0}s")]
    ModelLoadTimeout(u64),

    #[error("Failed to load summarization model: {0}")]
    ModelLoadError(String),
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::SummarizationFailure(error.to_string())
    }
}
