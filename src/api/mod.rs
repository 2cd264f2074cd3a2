//! HTTP API surface and request handling

pub mod handlers;
pub mod server;

// Re-export the main entry points for convenience
pub use handlers::AppState;
pub use server::{build_router, serve};
