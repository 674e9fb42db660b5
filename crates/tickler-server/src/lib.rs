// ABOUTME: HTTP server for tickler, providing the to-do REST API and the tool-invocation endpoint.
// ABOUTME: Uses Axum with shared service state; every request runs under a wall-clock budget.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{BackendKind, ConfigError, TicklerConfig};
pub use routes::create_router;
