// ABOUTME: Tool-invocation API handlers: list tool definitions and call a tool by name.
// ABOUTME: Tool calls run under the request budget and answer with text content plus an isError flag.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;
use tickler_agent::ToolResult;

use crate::api::error::{ApiError, within_budget};
use crate::app_state::SharedState;

/// GET /api/tools - Definitions of every registered tool.
pub async fn list_tools(State(state): State<SharedState>) -> Json<Value> {
    let tools = state.registry.definitions().await;
    Json(serde_json::json!({ "tools": tools }))
}

/// POST /api/tools/{name} - Invoke a tool with a JSON argument object.
pub async fn invoke_tool(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(params): Json<Value>,
) -> Result<Json<ToolResult>, ApiError> {
    let tool = state
        .registry
        .get(&name)
        .await
        .ok_or_else(|| ApiError::UnknownTool(name.clone()))?;

    within_budget(state.request_budget, async {
        let result = tool.execute(params).await.map_err(ApiError::Tool)?;
        tracing::info!(tool = %name, is_error = result.is_error, "tool invoked");
        tracing::debug!(tool = %name, output = %result.joined_text(), "tool output");
        Ok::<_, ApiError>(Json(result))
    })
    .await
}
