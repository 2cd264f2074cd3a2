use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;
use tracing::instrument::WithSubscriber;
use tracing_subscriber::fmt::MakeWriter;

use text_summarizer::api::handlers::{AppState, health_handler, root_handler, summarize_handler};
use text_summarizer::api::server::build_router;
use text_summarizer::core::models::{
    ErrorDetail, HealthResponse, RootResponse, SummarizeRequest, SummarizeResponse,
};
use text_summarizer::engine::{ModelLoader, SummaryEngine, SummaryModel, SummaryParams};
use text_summarizer::errors::SummarizerError;

struct EchoModel;

#[async_trait]
impl SummaryModel for EchoModel {
    async fn summarize(
        &self,
        text: &str,
        _params: &SummaryParams,
    ) -> Result<String, SummarizerError> {
        Ok(format!("S({text})"))
    }
}

struct FailingModel;

#[async_trait]
impl SummaryModel for FailingModel {
    async fn summarize(
        &self,
        _text: &str,
        _params: &SummaryParams,
    ) -> Result<String, SummarizerError> {
        Err(SummarizerError::SummarizationFailure(
            "backend down".to_string(),
        ))
    }
}

struct FixedLoader {
    model: Arc<dyn SummaryModel>,
}

#[async_trait]
impl ModelLoader for FixedLoader {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError> {
        Ok(Arc::clone(&self.model))
    }
}

struct FailingLoader;

#[async_trait]
impl ModelLoader for FailingLoader {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError> {
        Err(SummarizerError::ModelLoadError(
            "connect refused".to_string(),
        ))
    }
}

struct SlowLoader {
    model: Arc<dyn SummaryModel>,
}

#[async_trait]
impl ModelLoader for SlowLoader {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(Arc::clone(&self.model))
    }
}

/// Shared buffer that collects JSON log lines written during a test.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn json_lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogBufferWriter(Arc::clone(&self.0))
    }
}

struct LogBufferWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn state_with_model(model: Arc<dyn SummaryModel>) -> AppState {
    AppState {
        engine: Arc::new(SummaryEngine::new(
            Arc::new(FixedLoader { model }),
            Duration::from_secs(5),
        )),
    }
}

fn state_with_failing_loader() -> AppState {
    AppState {
        engine: Arc::new(SummaryEngine::new(
            Arc::new(FailingLoader),
            Duration::from_secs(5),
        )),
    }
}

fn summarize_request(text: &str) -> SummarizeRequest {
    serde_json::from_value(serde_json::json!({ "text": text })).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_reports_service_running() {
    let response = root_handler().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: RootResponse = body_json(response).await;
    assert_eq!(body.message, "AI Text Summarizer API is running");
}

#[tokio::test]
async fn test_health_reports_healthy_and_triggers_load() {
    let state = state_with_model(Arc::new(EchoModel));
    let engine = Arc::clone(&state.engine);

    let response = health_handler(State(state)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: HealthResponse = body_json(response).await;
    assert_eq!(body.status, "healthy");

    // The first probe performs the initial load rather than reporting
    // an unloaded engine as healthy.
    assert_eq!(engine.stats().await.load_attempts, 1);
}

#[tokio::test]
async fn test_health_with_unavailable_engine_returns_503() {
    let state = state_with_failing_loader();

    let response = health_handler(State(state)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: ErrorDetail = body_json(response).await;
    assert_eq!(body.detail, "Summarization model not loaded");
}

#[tokio::test]
async fn test_summarize_returns_summary() {
    let state = state_with_model(Arc::new(EchoModel));

    let response = summarize_handler(State(state), Json(summarize_request("hello world"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: SummarizeResponse = body_json(response).await;
    assert_eq!(body.summary, "S(hello world)");
}

#[tokio::test]
async fn test_summarize_empty_text_returns_400() {
    let state = state_with_model(Arc::new(EchoModel));

    let response = summarize_handler(State(state), Json(summarize_request("   "))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorDetail = body_json(response).await;
    assert_eq!(body.detail, "Text cannot be empty");
}

#[tokio::test]
async fn test_summarize_with_unavailable_engine_returns_503() {
    let state = state_with_failing_loader();

    let response = summarize_handler(State(state), Json(summarize_request("hello"))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: ErrorDetail = body_json(response).await;
    assert_eq!(body.detail, "Summarization model not loaded");
}

#[tokio::test]
async fn test_summarize_model_failure_returns_500_with_cause() {
    // A loaded model that fails must surface as 500, not as 503.
    let state = state_with_model(Arc::new(FailingModel));

    let response = summarize_handler(State(state), Json(summarize_request("hello"))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorDetail = body_json(response).await;
    assert_eq!(body.detail, "Failed to generate summary: backend down");
}

#[tokio::test]
async fn test_router_serves_summarize_end_to_end() {
    let origins = vec!["http://localhost:3000".to_string()];
    let router = build_router(state_with_model(Arc::new(EchoModel)), &origins);

    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::from(r#"{"text": "hello world"}"#))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("allow-origin header on credentialed CORS response");
    assert_eq!(allow_origin, "http://localhost:3000");

    let body: SummarizeResponse = body_json(response).await;
    assert_eq!(body.summary, "S(hello world)");
}

#[tokio::test]
async fn test_router_answers_cors_preflight() {
    let origins = vec![
        "http://localhost:3000".to_string(),
        "https://only-mar.github.io".to_string(),
    ];
    let router = build_router(state_with_model(Arc::new(EchoModel)), &origins);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/summarize")
        .header(header::ORIGIN, "https://only-mar.github.io")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "https://only-mar.github.io"
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
}

#[tokio::test]
async fn test_router_serves_root_and_health() {
    let router = build_router(state_with_model(Arc::new(EchoModel)), &[]);

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_router_rejects_body_without_text_field() {
    let router = build_router(state_with_model(Arc::new(EchoModel)), &[]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"max_length": 60}"#))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_router_unknown_path_returns_404() {
    let router = build_router(state_with_model(Arc::new(EchoModel)), &[]);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_health_and_summarize_share_one_load() {
    // First-time health probes racing summarize calls must resolve to a
    // single model load, with every request answered from it.
    let state = AppState {
        engine: Arc::new(SummaryEngine::new(
            Arc::new(SlowLoader {
                model: Arc::new(EchoModel),
            }),
            Duration::from_secs(5),
        )),
    };
    let engine = Arc::clone(&state.engine);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    health_handler(State(state)).await
                } else {
                    summarize_handler(State(state), Json(summarize_request("hello"))).await
                }
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(engine.stats().await.load_attempts, 1);
}

#[tokio::test]
async fn test_request_log_lines_share_one_request_id() {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_writer(buffer.clone())
        .finish();

    let state = state_with_model(Arc::new(EchoModel));
    let response = summarize_handler(State(state), Json(summarize_request("hello world")))
        .with_subscriber(subscriber)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let lines = buffer.json_lines();

    // The model loads mid-request here, so the engine's and orchestrator's
    // lines are captured alongside the handler's own.
    let messages: Vec<&str> = lines
        .iter()
        .filter_map(|line| line["fields"]["message"].as_str())
        .collect();
    assert!(messages.contains(&"Received summarize request"));
    assert!(messages.contains(&"Summarizing request"));
    assert!(messages.contains(&"Loading summarization model"));
    assert!(messages.contains(&"Summarize request succeeded"));

    let ids: Vec<&str> = lines
        .iter()
        .map(|line| {
            line["span"]["request_id"]
                .as_str()
                .expect("log line missing request id")
        })
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
}
