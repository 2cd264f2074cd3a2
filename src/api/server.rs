//! HTTP server assembly: routes, CORS, and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::api::handlers::{self, AppState};
use crate::core::config::AppConfig;
use crate::engine::{HfInferenceLoader, SummaryEngine};

/// Builds the application router for the given state and allowed origins.
///
/// Methods and headers mirror the request rather than using the wildcard,
/// which cannot be combined with credentialed CORS.
#[must_use]
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Skipping unparseable allowed origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/api/health", get(handlers::health_handler))
        .route("/api/summarize", post(handlers::summarize_handler))
        .with_state(state)
        .layer(cors)
}

/// Starts the HTTP server and blocks until it exits.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails while
/// running.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let loader = Arc::new(HfInferenceLoader::new(
        config.endpoint_url(),
        config.hf_api_token.clone(),
    ));
    let engine = Arc::new(SummaryEngine::new(
        loader,
        Duration::from_secs(config.model_load_timeout_secs),
    ));
    let state = AppState { engine };

    let router = build_router(state, &config.allowed_origins);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, model = %config.model_id, "Summarizer API listening");

    axum::serve(listener, router).await?;

    Ok(())
}
