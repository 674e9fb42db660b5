// ABOUTME: Defines the Todo record and TodoPatch partial-update types.
// ABOUTME: Todos carry a ULID-based id, free-form text, a completion flag, and an immutable creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single to-do item. Records live for a bounded time in the backing
/// store; this struct is the materialized view handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new, not-yet-completed Todo with a fresh ULID and the
    /// creation timestamp set to now.
    ///
    /// ULIDs lead with the millisecond timestamp and end in 80 random bits,
    /// so ids sort roughly by creation time and do not collide under rapid
    /// concurrent creation.
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new().to_string(),
            text,
            completed: false,
            created_at: now,
        }
    }

    /// One-line human-readable rendering: `<id>: <text> [✓]` or `<id>: <text> [ ]`.
    pub fn summary_line(&self) -> String {
        let mark = if self.completed { "✓" } else { " " };
        format!("{}: {} [{}]", self.id, self.text, mark)
    }
}

/// Partial update for a Todo. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

/// Returns true if the text is usable as to-do content (not empty or whitespace).
pub fn is_valid_text(text: &str) -> bool {
    !text.trim().is_empty()
}
