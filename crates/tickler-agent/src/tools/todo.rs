// ABOUTME: Implements the todo tool dispatching add/list/update/delete actions to the TodoService.
// ABOUTME: Renders results as text lines; missing input and unknown targets become readable messages.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tickler_core::{Todo, TodoPatch};
use tickler_store::{StoreError, TodoService};

use crate::tool::{Tool, ToolResult};

pub const NOT_FOUND: &str = "To-do not found.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoArgs {
    action: Option<String>,
    text: Option<String>,
    todo_id: Option<String>,
    completed: Option<bool>,
}

/// Tool exposing the to-do list to tool-invoking clients.
#[derive(Clone)]
pub struct TodoTool {
    pub(crate) service: TodoService,
}

impl TodoTool {
    pub fn new(service: TodoService) -> Self {
        Self { service }
    }

    async fn add(&self, text: Option<String>) -> Result<ToolResult, anyhow::Error> {
        let text = text.unwrap_or_default();
        match self.service.add(&text).await {
            Ok(todo) => Ok(ToolResult::text(format!("Added to-do: {}", todo.text))),
            Err(e) if e.is_validation() => {
                Ok(ToolResult::error("Text is required to add a to-do."))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<ToolResult, anyhow::Error> {
        let todos = self.service.list().await?;
        if todos.is_empty() {
            return Ok(ToolResult::text("No to-dos found."));
        }
        let lines: Vec<String> = todos.iter().map(Todo::summary_line).collect();
        Ok(ToolResult::text(lines.join("\n")))
    }

    async fn update(
        &self,
        todo_id: Option<String>,
        patch: TodoPatch,
    ) -> Result<ToolResult, anyhow::Error> {
        let Some(todo_id) = todo_id.filter(|id| !id.is_empty()) else {
            return Ok(ToolResult::error("todoId is required to update a to-do."));
        };
        match self.service.update(&todo_id, &patch).await {
            Ok(Some(todo)) => Ok(ToolResult::text(format!(
                "Updated to-do: {}",
                todo.summary_line()
            ))),
            Ok(None) => Ok(ToolResult::text(NOT_FOUND)),
            Err(e) => validation_or_bail(e),
        }
    }

    async fn delete(&self, todo_id: Option<String>) -> Result<ToolResult, anyhow::Error> {
        let Some(todo_id) = todo_id.filter(|id| !id.is_empty()) else {
            return Ok(ToolResult::error("todoId is required to delete a to-do."));
        };
        self.service.delete(&todo_id).await?;
        Ok(ToolResult::text(format!("Deleted to-do: {}", todo_id)))
    }
}

/// Validation failures become error results; anything else is propagated.
fn validation_or_bail(err: StoreError) -> Result<ToolResult, anyhow::Error> {
    match err {
        StoreError::Validation(msg) => Ok(ToolResult::error(format!("Invalid input: {}", msg))),
        other => Err(other.into()),
    }
}

#[async_trait]
impl Tool for TodoTool {
    fn name(&self) -> &str {
        "todo"
    }

    fn description(&self) -> &str {
        "Manage a to-do list. Actions: add (needs text), list, update (needs todoId, optional text and completed), delete (needs todoId). To-dos expire three hours after creation."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "enum": ["add", "list", "update", "delete"],
                    "description": "Action to perform."
                },
                "text": {
                    "type": "string",
                    "description": "To-do text (add) or replacement text (update)."
                },
                "todoId": {
                    "type": "string",
                    "description": "Id of the to-do to update or delete."
                },
                "completed": {
                    "type": "boolean",
                    "description": "New completion state (update)."
                }
            },
            "required": ["action"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let args: TodoArgs = match serde_json::from_value(params) {
            Ok(args) => args,
            Err(e) => return Ok(ToolResult::error(format!("Invalid arguments: {}", e))),
        };

        tracing::debug!(action = ?args.action, todo_id = ?args.todo_id, "todo tool invoked");

        match args.action.as_deref() {
            Some("add") => self.add(args.text).await,
            Some("list") => self.list().await,
            Some("update") => {
                let patch = TodoPatch {
                    text: args.text,
                    completed: args.completed,
                };
                self.update(args.todo_id, patch).await
            }
            Some("delete") => self.delete(args.todo_id).await,
            Some(other) => Ok(ToolResult::error(format!(
                "Unknown action '{}'. Expected one of: add, list, update, delete.",
                other
            ))),
            None => Ok(ToolResult::error(
                "action is required. Expected one of: add, list, update, delete.",
            )),
        }
    }
}
