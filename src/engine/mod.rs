//! Summarization engine lifecycle and model backends

pub mod adapter;
pub mod backend;
pub mod hf;

// Re-export main types for convenience
pub use adapter::{EngineStats, EngineStatus, SummaryEngine};
pub use backend::{ModelLoader, SummaryModel, SummaryParams};
pub use hf::{HfInferenceLoader, HfInferenceModel};
