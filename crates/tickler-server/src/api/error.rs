// ABOUTME: Error responses shared by the tickler HTTP handlers.
// ABOUTME: Maps store, tool, and timeout failures to status codes with a JSON error body.

use std::future::Future;
use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tickler_store::StoreError;

/// Failures an API handler can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("tool not found: {0}")]
    UnknownTool(String),

    #[error("tool execution failed: {0}")]
    Tool(anyhow::Error),

    #[error("request exceeded its {0:?} budget")]
    Timeout(Duration),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Store(StoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Store(StoreError::Unavailable(e)) => {
                tracing::error!("store unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store unavailable".to_string(),
                )
            }
            ApiError::UnknownTool(name) => {
                (StatusCode::NOT_FOUND, format!("tool not found: {}", name))
            }
            ApiError::Tool(e) => {
                tracing::error!("tool execution failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "tool execution failed".to_string(),
                )
            }
            ApiError::Timeout(budget) => {
                tracing::error!("request abandoned after {:?}", budget);
                (StatusCode::GATEWAY_TIMEOUT, "request timed out".to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Run `fut` under a wall-clock budget. On expiry the future is dropped,
/// abandoning any in-flight backend calls without rollback.
pub async fn within_budget<F, T>(budget: Duration, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::time::timeout(budget, fut)
        .await
        .map_err(|_| ApiError::Timeout(budget))?
}
