// ABOUTME: Route definitions and handler functions for the tickler HTTP API.
// ABOUTME: Assembles the to-do and tool routes into a single Axum Router with shared state and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/todos",
            get(api::todos::list_todos).delete(api::todos::delete_todos),
        )
        .route("/api/tools", get(api::tools::list_tools))
        .route("/api/tools/{name}", post(api::tools::invoke_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
