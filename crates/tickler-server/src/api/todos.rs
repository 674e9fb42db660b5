// ABOUTME: To-do list API handlers: read the reconciled list, delete one to-do, or delete them all.
// ABOUTME: Every response carries the list state after the operation as {"todos": [...]}.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tickler_core::Todo;

use crate::api::error::{ApiError, within_budget};
use crate::app_state::SharedState;

/// Response body for every to-do list endpoint.
#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

/// Query parameters for DELETE /api/todos.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// GET /api/todos - List live to-dos, newest first.
pub async fn list_todos(
    State(state): State<SharedState>,
) -> Result<Json<TodoListResponse>, ApiError> {
    within_budget(state.request_budget, async {
        let todos = state.service.list().await?;
        Ok::<_, ApiError>(Json(TodoListResponse { todos }))
    })
    .await
}

/// DELETE /api/todos?id=<id> - Delete one to-do and return the updated list.
/// Without an id, delete every to-do and return an empty list.
pub async fn delete_todos(
    State(state): State<SharedState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<TodoListResponse>, ApiError> {
    within_budget(state.request_budget, async {
        match params.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                state.service.delete(id).await?;
                let todos = state.service.list().await?;
                Ok::<_, ApiError>(Json(TodoListResponse { todos }))
            }
            None => {
                state.service.delete_all().await?;
                Ok(Json(TodoListResponse { todos: Vec::new() }))
            }
        }
    })
    .await
}
