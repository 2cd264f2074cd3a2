/// Text Summarizer API - an HTTP service that condenses arbitrary-length text
/// with a pretrained summarization model.
///
/// The model itself (facebook/bart-large-cnn by default) lives behind an
/// inference endpoint and is treated as an opaque collaborator. What this
/// crate implements is everything around it:
///
/// 1. A word-aligned chunker that splits input into segments the model's
///    input limit can accept
/// 2. A lazily-loaded engine adapter with an Unloaded/Loading/Ready/Failed
///    lifecycle and a single-flight load guard
/// 3. An orchestrator that summarizes chunk-by-chunk and recombines the
///    results in order
/// 4. A thin axum HTTP surface mapping outcomes to status codes
///
/// # Architecture
///
/// The system uses:
/// - Tokio for async runtime
/// - axum + tower-http for the HTTP surface and CORS
/// - reqwest for the inference API calls
/// - tracing for structured JSON logs
///
/// # Example
///
/// ```no_run
/// use text_summarizer::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     // Set up structured logging
///     text_summarizer::setup_logging();
///
///     // Read configuration (all fields have defaults)
///     let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
///
///     // Serve until shutdown
///     text_summarizer::api::serve(config).await
/// }
/// ```
// Module declarations
pub mod api;
pub mod chunker;
pub mod core;
pub mod engine;
pub mod errors;
pub mod summarize;

/// Configure structured logging with JSON format.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for log
/// aggregation. Call once at process start, before serving requests.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your binary
/// text_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
