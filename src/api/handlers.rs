//! Request handlers for the summarization API.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::core::models::{
    ErrorDetail, HealthResponse, RootResponse, SummarizeRequest, SummarizeResponse,
};
use crate::engine::SummaryEngine;
use crate::errors::SummarizerError;
use crate::summarize::summarize_text;

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SummaryEngine>,
}

/// Root endpoint: confirms the service is up.
pub async fn root_handler() -> Response {
    (
        StatusCode::OK,
        Json(RootResponse {
            message: "AI Text Summarizer API is running".to_string(),
        }),
    )
        .into_response()
}

/// Health probe. Triggers the model load when it has not been attempted
/// yet, so readiness reflects an actual load outcome.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    match state.engine.ready().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Health check failed");
            error_response(&e)
        }
    }
}

/// Summarization endpoint.
///
/// Handling runs inside a span carrying a generated request id, so log
/// lines from the orchestrator and engine inherit it.
pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(body): Json<SummarizeRequest>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("request", request_id = %request_id);

    async move {
        info!(
            text_chars = body.text.chars().count(),
            "Received summarize request"
        );

        match summarize_text(&state.engine, &body).await {
            Ok(summary) => {
                info!("Summarize request succeeded");
                (StatusCode::OK, Json(SummarizeResponse { summary })).into_response()
            }
            Err(e) => {
                error!(error = %e, "Summarize request failed");
                error_response(&e)
            }
        }
    }
    .instrument(span)
    .await
}

/// Maps a summarizer error onto the wire status and error body.
#[must_use]
pub fn error_response(error: &SummarizerError) -> Response {
    let (status, detail) = match error {
        SummarizerError::EmptyInput => (StatusCode::BAD_REQUEST, error.to_string()),
        SummarizerError::EngineUnavailable => (StatusCode::SERVICE_UNAVAILABLE, error.to_string()),
        // Load errors stay inside the engine; if one leaks, report the
        // same unavailable contract as EngineUnavailable.
        SummarizerError::ModelLoadTimeout(_) | SummarizerError::ModelLoadError(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            SummarizerError::EngineUnavailable.to_string(),
        ),
        SummarizerError::SummarizationFailure(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    };

    (status, Json(ErrorDetail { detail })).into_response()
}
