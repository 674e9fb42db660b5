// ABOUTME: Record store owning create/read/update/delete of individual TTL-bounded to-do records.
// ABOUTME: Expired, deleted, never-created, and malformed records all read back as None.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tickler_core::todo::is_valid_text;
use tickler_core::{Todo, TodoPatch};

use crate::backend::{Backend, Fields};
use crate::error::StoreError;
use crate::keys::KeySpace;

const FIELD_ID: &str = "id";
const FIELD_TEXT: &str = "text";
const FIELD_COMPLETED: &str = "completed";
const FIELD_CREATED_AT: &str = "createdAt";

/// Stores each Todo as a hash that expires a fixed time after creation.
/// Updates never extend that lifetime.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn Backend>,
    keys: KeySpace,
    ttl: Duration,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn Backend>, keys: KeySpace, ttl: Duration) -> Self {
        Self { backend, keys, ttl }
    }

    /// Persist a new Todo with the configured TTL starting now.
    pub async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        if !is_valid_text(text) {
            return Err(StoreError::Validation(
                "text is required to create a to-do".to_string(),
            ));
        }

        let todo = Todo::new(text.to_string());
        self.backend
            .put_hash(&self.keys.record(&todo.id), &to_fields(&todo), self.ttl)
            .await?;
        tracing::debug!(id = %todo.id, ttl_secs = self.ttl.as_secs(), "created record");
        Ok(todo)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let fields = self.backend.get_hash(&self.keys.record(id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }
        Ok(from_fields(id, &fields))
    }

    /// Apply a partial update. Returns `None` if the record is gone. The
    /// record's remaining lifetime is left untouched.
    pub async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Option<Todo>, StoreError> {
        if patch.text.as_deref().is_some_and(|text| !is_valid_text(text)) {
            return Err(StoreError::Validation("text must not be empty".to_string()));
        }

        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut fields = Vec::with_capacity(2);
        if let Some(text) = &patch.text {
            fields.push((FIELD_TEXT.to_string(), text.clone()));
        }
        if let Some(completed) = patch.completed {
            fields.push((FIELD_COMPLETED.to_string(), completed.to_string()));
        }

        let updated = self
            .backend
            .update_hash_if_exists(&self.keys.record(id), &fields)
            .await?;
        if !updated {
            tracing::debug!(id, "update target is gone");
            return Ok(None);
        }

        tracing::debug!(id, "updated record");
        self.get(id).await
    }

    /// Remove a record. Deleting an absent record is a no-op.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.backend.delete(&self.keys.record(id)).await?;
        tracing::debug!(id, "deleted record");
        Ok(())
    }

    /// Remove every listed record concurrently.
    pub async fn delete_many(&self, ids: &[String]) -> Result<(), StoreError> {
        try_join_all(ids.iter().map(|id| self.delete(id))).await?;
        Ok(())
    }
}

fn to_fields(todo: &Todo) -> Vec<(String, String)> {
    vec![
        (FIELD_ID.to_string(), todo.id.clone()),
        (FIELD_TEXT.to_string(), todo.text.clone()),
        (FIELD_COMPLETED.to_string(), todo.completed.to_string()),
        (FIELD_CREATED_AT.to_string(), todo.created_at.to_rfc3339()),
    ]
}

/// Materialize a Todo from its stored hash. A hash missing fields or holding
/// unparseable values is logged and treated as absent.
fn from_fields(id: &str, fields: &Fields) -> Option<Todo> {
    let parsed = parse_fields(id, fields);
    if parsed.is_none() {
        tracing::warn!(id, ?fields, "ignoring malformed record");
    }
    parsed
}

fn parse_fields(id: &str, fields: &Fields) -> Option<Todo> {
    let text = fields.get(FIELD_TEXT)?.clone();
    let completed = fields.get(FIELD_COMPLETED)?.parse::<bool>().ok()?;
    let created_at = DateTime::parse_from_rfc3339(fields.get(FIELD_CREATED_AT)?)
        .ok()?
        .with_timezone(&Utc);
    Some(Todo {
        id: id.to_string(),
        text,
        completed,
        created_at,
    })
}
