// ABOUTME: Shared application state for the tickler HTTP server.
// ABOUTME: Holds the to-do service, the tool registry, and the per-request wall-clock budget.

use std::sync::Arc;
use std::time::Duration;

use tickler_agent::Registry;
use tickler_store::TodoService;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub service: TodoService,
    pub registry: Registry,
    /// Upper bound on how long one HTTP request or tool call may run.
    pub request_budget: Duration,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(service: TodoService, registry: Registry, request_budget: Duration) -> Self {
        Self {
            service,
            registry,
            request_budget,
        }
    }

    /// Build state with the standard tool registry for `service`.
    pub async fn with_default_tools(service: TodoService, request_budget: Duration) -> Self {
        let registry = tickler_agent::build_registry(service.clone()).await;
        tracing::info!(
            count = registry.count().await,
            tools = ?registry.list().await,
            "tool registry ready"
        );
        Self::new(service, registry, request_budget)
    }
}
