// ABOUTME: Index manager keeping the newest-first list of to-do ids used for enumeration.
// ABOUTME: Entries may dangle after out-of-band expiry; callers reconcile them lazily.

use std::sync::Arc;

use crate::backend::Backend;
use crate::error::StoreError;
use crate::keys::KeySpace;

/// Ordered sequence of record ids, head = most recently added. Holds
/// non-owning references: removing an id never touches its record.
#[derive(Clone)]
pub struct TodoIndex {
    backend: Arc<dyn Backend>,
    keys: KeySpace,
}

impl TodoIndex {
    pub fn new(backend: Arc<dyn Backend>, keys: KeySpace) -> Self {
        Self { backend, keys }
    }

    pub async fn append(&self, id: &str) -> Result<(), StoreError> {
        self.backend.list_push_front(&self.keys.index(), id).await?;
        Ok(())
    }

    /// Drop every occurrence of `id`. Absent ids are a no-op.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.backend.list_remove(&self.keys.index(), id).await?;
        Ok(())
    }

    /// Current ids, newest first. May include ids whose records are gone.
    pub async fn enumerate(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.backend.list_range(&self.keys.index()).await?)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.delete(&self.keys.index()).await?;
        Ok(())
    }
}
