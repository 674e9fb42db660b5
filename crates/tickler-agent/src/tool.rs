// ABOUTME: Tool trait, tool result types, and an async name-keyed tool registry.
// ABOUTME: Tools take JSON arguments and answer with human-readable text content.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// A named operation callers can invoke with a JSON argument object.
///
/// `execute` returns `Ok` with an error-flagged result for bad input the
/// caller can fix, and `Err` for infrastructure failures.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema describing the accepted arguments.
    fn schema(&self) -> Value;

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error>;
}

/// One piece of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Output of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// All text content joined by newlines.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Registry of tools keyed by name. Registering a tool under an existing
/// name replaces it.
#[derive(Default)]
pub struct Registry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        let name = tool.name().to_string();
        tracing::debug!(tool = %name, "registered tool");
        self.tools.write().await.insert(name, Arc::new(tool));
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().await.get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub async fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn count(&self) -> usize {
        self.tools.read().await.len()
    }

    /// Provider-agnostic definitions (`name`, `description`, `parameters`)
    /// for every registered tool, sorted by name.
    pub async fn definitions(&self) -> Vec<Value> {
        let tools = self.tools.read().await;
        let mut defs: Vec<(&String, Value)> = tools
            .iter()
            .map(|(name, tool)| {
                (
                    name,
                    json!({
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.schema(),
                    }),
                )
            })
            .collect();
        defs.sort_by(|a, b| a.0.cmp(b.0));
        defs.into_iter().map(|(_, def)| def).collect()
    }
}
