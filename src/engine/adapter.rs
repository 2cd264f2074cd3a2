//! Engine lifecycle around a lazily loaded summarization model.
//!
//! The model is loaded on first use. Concurrent callers coalesce onto a
//! single load attempt and share its outcome; a failed attempt is not
//! sticky, so the next caller after a failure triggers a fresh attempt.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::engine::backend::{ModelLoader, SummaryModel, SummaryParams};
use crate::errors::SummarizerError;

enum EngineState {
    Unloaded,
    Loading,
    Ready(Arc<dyn SummaryModel>),
    Failed(String),
}

/// Externally visible engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Unloaded,
    Loading,
    Ready,
    /// The most recent load attempt failed; carries the recorded cause.
    Failed(String),
}

/// Counters over load attempts since process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Completed load attempts, successful or not.
    pub load_attempts: u64,
    /// Load attempts that failed or timed out.
    pub load_failures: u64,
}

/// Serves summarization requests against a lazily loaded model.
///
/// # Concurrency
///
/// All methods take `&self` and are safe to call concurrently. The load
/// guard serializes load attempts; callers that arrive while an attempt is
/// in flight wait for it and share its outcome instead of starting another.
pub struct SummaryEngine {
    state: RwLock<EngineState>,
    load_guard: Mutex<()>,
    loader: Arc<dyn ModelLoader>,
    load_timeout: Duration,
    stats: RwLock<EngineStats>,
}

impl std::fmt::Debug for SummaryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryEngine")
            .field("load_timeout", &self.load_timeout)
            .finish_non_exhaustive()
    }
}

impl SummaryEngine {
    #[must_use]
    pub fn new(loader: Arc<dyn ModelLoader>, load_timeout: Duration) -> Self {
        Self {
            state: RwLock::new(EngineState::Unloaded),
            load_guard: Mutex::new(()),
            loader,
            load_timeout,
            stats: RwLock::new(EngineStats::default()),
        }
    }

    /// Summarizes `text` within the given bounds, loading the model first
    /// if necessary.
    ///
    /// # Errors
    ///
    /// Returns `SummarizerError::EngineUnavailable` if the model could not
    /// be loaded, or `SummarizerError::SummarizationFailure` if the loaded
    /// model rejects the request.
    pub async fn summarize(
        &self,
        text: &str,
        params: &SummaryParams,
    ) -> Result<String, SummarizerError> {
        let model = self.ensure_ready().await?;
        model.summarize(text, params).await
    }

    /// Loads the model if needed and reports whether the engine can serve.
    ///
    /// Health probes call this so that the first probe triggers the
    /// initial load instead of passively reporting `Unloaded`.
    ///
    /// # Errors
    ///
    /// Returns `SummarizerError::EngineUnavailable` if the model could not
    /// be loaded.
    pub async fn ready(&self) -> Result<(), SummarizerError> {
        self.ensure_ready().await.map(|_| ())
    }

    /// Returns a snapshot of the engine state.
    pub async fn status(&self) -> EngineStatus {
        match &*self.state.read().await {
            EngineState::Unloaded => EngineStatus::Unloaded,
            EngineState::Loading => EngineStatus::Loading,
            EngineState::Ready(_) => EngineStatus::Ready,
            EngineState::Failed(cause) => EngineStatus::Failed(cause.clone()),
        }
    }

    /// Returns a snapshot of the load counters.
    pub async fn stats(&self) -> EngineStats {
        *self.stats.read().await
    }

    /// Returns the loaded model, performing or awaiting a load attempt as
    /// needed.
    async fn ensure_ready(&self) -> Result<Arc<dyn SummaryModel>, SummarizerError> {
        // Fast path: model already loaded.
        {
            if let EngineState::Ready(model) = &*self.state.read().await {
                return Ok(Arc::clone(model));
            }
        }

        let attempts_before = self.stats.read().await.load_attempts;

        let _guard = self.load_guard.lock().await;

        // Double-check under the guard: an attempt may have finished while
        // this caller waited for it.
        {
            let state = self.state.read().await;
            match &*state {
                EngineState::Ready(model) => return Ok(Arc::clone(model)),
                EngineState::Failed(cause) => {
                    let attempts_now = self.stats.read().await.load_attempts;
                    if attempts_now > attempts_before {
                        debug!(
                            cause = %cause,
                            "Sharing outcome of load attempt that failed while waiting"
                        );
                        return Err(SummarizerError::EngineUnavailable);
                    }
                    // The failure predates this caller; fall through and retry.
                }
                EngineState::Unloaded | EngineState::Loading => {}
            }
        }

        *self.state.write().await = EngineState::Loading;
        info!("Loading summarization model");

        match timeout(self.load_timeout, self.loader.load()).await {
            Ok(Ok(model)) => {
                *self.state.write().await = EngineState::Ready(Arc::clone(&model));
                self.stats.write().await.load_attempts += 1;
                info!("Summarization model loaded");
                Ok(model)
            }
            Ok(Err(e)) => {
                let cause = e.to_string();
                error!(error = %cause, "Model load failed");
                self.record_failure(cause).await;
                Err(SummarizerError::EngineUnavailable)
            }
            Err(_) => {
                let cause =
                    SummarizerError::ModelLoadTimeout(self.load_timeout.as_secs()).to_string();
                error!(error = %cause, "Model load timed out");
                self.record_failure(cause).await;
                Err(SummarizerError::EngineUnavailable)
            }
        }
    }

    async fn record_failure(&self, cause: String) {
        *self.state.write().await = EngineState::Failed(cause);
        let mut stats = self.stats.write().await;
        stats.load_attempts += 1;
        stats.load_failures += 1;
    }
}
