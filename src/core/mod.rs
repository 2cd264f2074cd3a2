//! Shared configuration and request/response models

pub mod config;
pub mod models;

// Re-export main types for convenience
pub use config::AppConfig;
pub use models::{ErrorDetail, HealthResponse, RootResponse, SummarizeRequest, SummarizeResponse};
