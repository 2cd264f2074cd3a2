//! Hugging Face Inference API backend
//!
//! Talks to the hosted Inference API for a summarization model such as
//! `facebook/bart-large-cnn`. Loading performs a warm-up request with
//! `wait_for_model` so the hosted model is resident before the engine
//! reports ready.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::engine::backend::{ModelLoader, SummaryModel, SummaryParams};
use crate::errors::SummarizerError;

/// Short input used to force model residency during warm-up.
const WARMUP_INPUT: &str =
    "The quick brown fox jumps over the lazy dog while the farmer watches from the porch.";

/// Pulls the generated summary out of an Inference API response body.
///
/// The API returns a JSON array with one object per input sequence; we send
/// a single sequence, so only the first entry matters.
pub(crate) fn extract_summary_text(body: &Value) -> Option<String> {
    body.as_array()
        .and_then(|items| items.first())
        .and_then(|item| item.get("summary_text"))
        .and_then(|text| text.as_str())
        .map(std::string::ToString::to_string)
}

/// Loader that warms up a hosted Inference API model.
pub struct HfInferenceLoader {
    endpoint: String,
    api_token: Option<String>,
}

impl HfInferenceLoader {
    #[must_use]
    pub fn new(endpoint: String, api_token: Option<String>) -> Self {
        Self {
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl ModelLoader for HfInferenceLoader {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError> {
        info!(endpoint = %self.endpoint, "Warming up hosted summarization model");

        // No client-level timeout: the engine bounds the load attempt, and
        // summarize calls are deliberately unbounded.
        let client = Client::builder().build().map_err(|e| {
            SummarizerError::ModelLoadError(format!("Failed to build HTTP client: {e}"))
        })?;

        let request_body = json!({
            "inputs": WARMUP_INPUT,
            "parameters": {
                "max_length": 20,
                "min_length": 5,
                "do_sample": false
            },
            "options": {
                "wait_for_model": true
            }
        });

        let mut request = client.post(&self.endpoint).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            SummarizerError::ModelLoadError(format!("Warm-up request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummarizerError::ModelLoadError(format!(
                "Warm-up request rejected (status {status}): {error_text}"
            )));
        }

        info!("Hosted summarization model is resident");

        Ok(Arc::new(HfInferenceModel {
            client,
            endpoint: self.endpoint.clone(),
            api_token: self.api_token.clone(),
        }))
    }
}

/// A warmed-up Inference API model.
pub struct HfInferenceModel {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

#[async_trait]
impl SummaryModel for HfInferenceModel {
    async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> Result<String, SummarizerError> {
        #[cfg(feature = "debug-logs")]
        info!("Summarizing chunk:\n{text}");

        #[cfg(not(feature = "debug-logs"))]
        info!("Summarizing chunk of {} characters", text.chars().count());

        let request_body = json!({
            "inputs": text,
            "parameters": {
                "max_length": params.max_length,
                "min_length": params.min_length,
                "do_sample": false
            }
        });

        let mut request = self.client.post(&self.endpoint).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            SummarizerError::SummarizationFailure(format!("Inference request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummarizerError::SummarizationFailure(format!(
                "Inference API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::SummarizationFailure(format!(
                "Failed to parse inference response: {e}"
            ))
        })?;

        extract_summary_text(&response_json).ok_or_else(|| {
            SummarizerError::SummarizationFailure("No summary_text in response".to_string())
        })
    }
}
