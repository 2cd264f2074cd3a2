//! Model and loader traits implemented by summarization backends.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::SummarizerError;

/// Generation bounds forwarded to the model for a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryParams {
    /// Upper bound on generated summary length, in model tokens.
    pub max_length: u32,
    /// Lower bound on generated summary length, in model tokens.
    pub min_length: u32,
}

/// A loaded summarization model ready to serve requests.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Generates a summary of `text` within the given length bounds.
    ///
    /// # Errors
    ///
    /// Returns `SummarizerError::SummarizationFailure` if the backend
    /// rejects the request or produces no summary.
    async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> Result<String, SummarizerError>;
}

/// Produces a ready [`SummaryModel`].
///
/// Loading may involve network round trips or weight initialization; the
/// engine bounds each attempt with a timeout and callers never invoke this
/// directly.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Loads the model, returning it only once it can serve requests.
    ///
    /// # Errors
    ///
    /// Returns `SummarizerError::ModelLoadError` if the backend cannot be
    /// reached or refuses to initialize.
    async fn load(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError>;
}
