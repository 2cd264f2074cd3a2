//! Request orchestration over the chunking protocol
//!
//! Long input is split into word-aligned chunks, each chunk is summarized
//! independently with the caller's length bounds, and the partial summaries
//! are joined in input order.

use tracing::{debug, info};

use crate::chunker::{CHUNK_BUDGET, chunk_text};
use crate::core::models::SummarizeRequest;
use crate::engine::{SummaryEngine, SummaryParams};
use crate::errors::SummarizerError;

/// Summarizes the request text, chunking it when it exceeds the model
/// input budget.
///
/// Chunks are summarized sequentially and every chunk uses the same length
/// bounds; the first chunk failure aborts the request.
///
/// # Errors
///
/// Returns `SummarizerError::EmptyInput` when the text is empty or
/// whitespace, `SummarizerError::EngineUnavailable` when the model cannot
/// be loaded, and `SummarizerError::SummarizationFailure` when the model
/// rejects a chunk.
pub async fn summarize_text(
    engine: &SummaryEngine,
    request: &SummarizeRequest,
) -> Result<String, SummarizerError> {
    if request.text.trim().is_empty() {
        return Err(SummarizerError::EmptyInput);
    }

    let chunks = chunk_text(&request.text, CHUNK_BUDGET);
    let params = SummaryParams {
        max_length: request.max_length,
        min_length: request.min_length,
    };

    info!(
        chunk_count = chunks.len(),
        max_length = params.max_length,
        min_length = params.min_length,
        "Summarizing request"
    );

    let mut summaries = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        debug!(
            chunk_index = index,
            chunk_chars = chunk.chars().count(),
            "Summarizing chunk"
        );
        summaries.push(engine.summarize(chunk, &params).await?);
    }

    Ok(summaries.join(" "))
}
