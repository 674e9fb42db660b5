// ABOUTME: Composite to-do operations (add, list, get, update, delete, delete-all) over the record store and index.
// ABOUTME: Listing reconciles the index lazily, pruning ids whose records expired out-of-band.

use std::sync::Arc;
use std::time::Duration;

use tickler_core::{Todo, TodoPatch};

use crate::backend::Backend;
use crate::error::StoreError;
use crate::index::TodoIndex;
use crate::keys::KeySpace;
use crate::record::RecordStore;

/// Records expire three hours after creation.
pub const DEFAULT_RECORD_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// Tunables for a TodoService.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub key_prefix: String,
    pub record_ttl: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key_prefix: String::new(),
            record_ttl: DEFAULT_RECORD_TTL,
        }
    }
}

/// Entry point for callers. Each method is one composite operation; there is
/// no lock spanning the record store and the index, so concurrent calls may
/// interleave between any two backend round trips.
#[derive(Clone)]
pub struct TodoService {
    records: RecordStore,
    index: TodoIndex,
}

impl TodoService {
    pub fn new(backend: Arc<dyn Backend>, options: StoreOptions) -> Self {
        let keys = KeySpace::new(options.key_prefix);
        Self {
            records: RecordStore::new(Arc::clone(&backend), keys.clone(), options.record_ttl),
            index: TodoIndex::new(backend, keys),
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn index(&self) -> &TodoIndex {
        &self.index
    }

    /// Create a record and put its id at the head of the index. A failed
    /// create never reaches the index.
    pub async fn add(&self, text: &str) -> Result<Todo, StoreError> {
        let todo = self.records.create(text).await?;
        self.index.append(&todo.id).await?;
        tracing::info!(id = %todo.id, "added to-do");
        Ok(todo)
    }

    /// Live records in index order, newest first. Ids whose records are gone
    /// are pruned from the index as they are found.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let ids = self.index.enumerate().await?;
        let mut todos = Vec::with_capacity(ids.len());

        for id in ids {
            match self.records.get(&id).await? {
                Some(todo) => todos.push(todo),
                None => self.prune(&id).await?,
            }
        }

        Ok(todos)
    }

    /// Targeted lookup. A miss also prunes the id from the index.
    pub async fn get(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let todo = self.records.get(id).await?;
        if todo.is_none() {
            self.prune(id).await?;
        }
        Ok(todo)
    }

    pub async fn update(&self, id: &str, patch: &TodoPatch) -> Result<Option<Todo>, StoreError> {
        let todo = self.records.update(id, patch).await?;
        if todo.is_none() {
            self.prune(id).await?;
        }
        Ok(todo)
    }

    /// Delete one record and its index entry. Safe to repeat.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.delete(id).await?;
        self.index.remove(id).await?;
        tracing::info!(id, "deleted to-do");
        Ok(())
    }

    /// Delete every record the index currently references, then clear it.
    ///
    /// Not atomic: an id appended after the snapshot is wiped from the index
    /// but its record survives until it expires.
    pub async fn delete_all(&self) -> Result<(), StoreError> {
        let ids = self.index.enumerate().await?;
        self.records.delete_many(&ids).await?;
        self.index.clear().await?;
        tracing::info!(count = ids.len(), "deleted all to-dos");
        Ok(())
    }

    async fn prune(&self, id: &str) -> Result<(), StoreError> {
        tracing::warn!(id, "pruning dangling index entry");
        self.index.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Fields, MemoryBackend};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn service() -> (Arc<MemoryBackend>, TodoService) {
        let backend = Arc::new(MemoryBackend::new());
        let service = TodoService::new(backend.clone(), StoreOptions::default());
        (backend, service)
    }

    fn texts(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.text.as_str()).collect()
    }

    /// Wraps a MemoryBackend and fails every call once `down` is set.
    struct FlakyBackend {
        inner: MemoryBackend,
        down: AtomicBool,
    }

    impl FlakyBackend {
        fn new() -> Self {
            Self {
                inner: MemoryBackend::new(),
                down: AtomicBool::new(false),
            }
        }

        fn check(&self) -> Result<(), BackendError> {
            if self.down.load(Ordering::SeqCst) {
                let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
                return Err(BackendError::Redis(redis::RedisError::from(io)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Backend for FlakyBackend {
        async fn put_hash(
            &self,
            key: &str,
            fields: &[(String, String)],
            ttl: Duration,
        ) -> Result<(), BackendError> {
            self.check()?;
            self.inner.put_hash(key, fields, ttl).await
        }

        async fn get_hash(&self, key: &str) -> Result<Fields, BackendError> {
            self.check()?;
            self.inner.get_hash(key).await
        }

        async fn update_hash_if_exists(
            &self,
            key: &str,
            fields: &[(String, String)],
        ) -> Result<bool, BackendError> {
            self.check()?;
            self.inner.update_hash_if_exists(key, fields).await
        }

        async fn list_push_front(&self, key: &str, value: &str) -> Result<(), BackendError> {
            self.check()?;
            self.inner.list_push_front(key, value).await
        }

        async fn list_range(&self, key: &str) -> Result<Vec<String>, BackendError> {
            self.check()?;
            self.inner.list_range(key).await
        }

        async fn list_remove(&self, key: &str, value: &str) -> Result<(), BackendError> {
            self.check()?;
            self.inner.list_remove(key, value).await
        }

        async fn delete(&self, key: &str) -> Result<(), BackendError> {
            self.check()?;
            self.inner.delete(key).await
        }
    }

    #[tokio::test]
    async fn add_then_list_puts_new_record_first() {
        let (_backend, service) = service();
        service.add("walk dog").await.unwrap();
        service.add("buy milk").await.unwrap();

        let todos = service.list().await.unwrap();
        assert_eq!(todos[0].text, "buy milk");
        assert!(!todos[0].completed);
    }

    #[tokio::test]
    async fn list_order_is_newest_first() {
        let (_backend, service) = service();
        for text in ["a", "b", "c"] {
            service.add(text).await.unwrap();
        }

        assert_eq!(texts(&service.list().await.unwrap()), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn list_follows_index_order_not_creation_time() {
        let (backend, service) = service();
        let a = service.add("a").await.unwrap();
        service.add("b").await.unwrap();

        // Move "a" back to the head by hand.
        backend.list_remove("todos", &a.id).await.unwrap();
        backend.list_push_front("todos", &a.id).await.unwrap();

        assert_eq!(texts(&service.list().await.unwrap()), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn list_prunes_records_removed_out_of_band() {
        let (backend, service) = service();
        service.add("a").await.unwrap();
        let b = service.add("b").await.unwrap();
        service.add("c").await.unwrap();

        backend.delete(&format!("todo:{}", b.id)).await.unwrap();

        let todos = service.list().await.unwrap();
        assert_eq!(texts(&todos), vec!["c", "a"]);
        assert!(!service.index().enumerate().await.unwrap().contains(&b.id));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_record_is_pruned_and_stays_pruned() {
        let (_backend, service) = service();
        let old = service.add("old").await.unwrap();
        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        let fresh = service.add("fresh").await.unwrap();

        tokio::time::advance(Duration::from_secs(2 * 60 * 60)).await;

        // Before listing the dangling id is still indexed.
        assert!(service.index().enumerate().await.unwrap().contains(&old.id));

        assert_eq!(texts(&service.list().await.unwrap()), vec!["fresh"]);
        assert_eq!(service.index().enumerate().await.unwrap(), vec![fresh.id.clone()]);
        assert_eq!(texts(&service.list().await.unwrap()), vec!["fresh"]);
    }

    #[tokio::test]
    async fn list_matches_exactly_the_live_indexed_records() {
        let (backend, service) = service();
        let mut live = Vec::new();
        for i in 0..6 {
            let todo = service.add(&format!("item {}", i)).await.unwrap();
            if i % 2 == 0 {
                backend.delete(&format!("todo:{}", todo.id)).await.unwrap();
            } else {
                live.push(todo.id);
            }
        }
        // Dangling id that never had a record.
        backend.list_push_front("todos", "ghost").await.unwrap();

        let listed: Vec<String> = service.list().await.unwrap().into_iter().map(|t| t.id).collect();
        live.reverse();
        assert_eq!(listed, live);
        assert_eq!(service.index().enumerate().await.unwrap(), live);
    }

    #[tokio::test]
    async fn failed_create_leaves_no_index_entry() {
        let (_backend, service) = service();
        assert!(service.add("").await.unwrap_err().is_validation());
        assert!(service.index().enumerate().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_is_partial_and_keeps_index() {
        let (_backend, service) = service();
        let todo = service.add("original").await.unwrap();

        let updated = service
            .update(
                &todo.id,
                &TodoPatch {
                    text: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "original");
        assert!(updated.completed);
        assert_eq!(service.index().enumerate().await.unwrap(), vec![todo.id]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_nothing() {
        let (_backend, service) = service();
        let patch = TodoPatch {
            text: Some("x".to_string()),
            completed: None,
        };

        assert!(service.update("nonexistent-id", &patch).await.unwrap().is_none());
        assert!(service.list().await.unwrap().is_empty());
        assert!(service.get("nonexistent-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn targeted_miss_prunes_index() {
        let (backend, service) = service();
        let todo = service.add("soon gone").await.unwrap();
        backend.delete(&format!("todo:{}", todo.id)).await.unwrap();

        assert!(service.get(&todo.id).await.unwrap().is_none());
        assert!(service.index().enumerate().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_matches_delete_once() {
        let (_backend, service) = service();
        let keep = service.add("keep").await.unwrap();
        let gone = service.add("gone").await.unwrap();

        service.delete(&gone.id).await.unwrap();
        let once = service.list().await.unwrap();
        service.delete(&gone.id).await.unwrap();
        let twice = service.list().await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice, vec![keep]);
    }

    #[tokio::test]
    async fn delete_all_empties_listing() {
        let (_backend, service) = service();
        let mut ids = Vec::new();
        for text in ["a", "b", "c"] {
            ids.push(service.add(text).await.unwrap().id);
        }

        service.delete_all().await.unwrap();

        assert!(service.list().await.unwrap().is_empty());
        assert!(service.index().enumerate().await.unwrap().is_empty());
        for id in ids {
            assert!(service.records().get(&id).await.unwrap().is_none());
        }

        // Repeating on an empty list is fine.
        service.delete_all().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_adds_are_all_listed() {
        let (_backend, service) = service();
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.add(&format!("task {}", i)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.list().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_unavailable() {
        let backend = Arc::new(FlakyBackend::new());
        let service = TodoService::new(backend.clone(), StoreOptions::default());
        service.add("before outage").await.unwrap();

        backend.down.store(true, Ordering::SeqCst);

        assert!(matches!(service.add("x").await, Err(StoreError::Unavailable(_))));
        assert!(matches!(service.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(service.delete("x").await, Err(StoreError::Unavailable(_))));
        assert!(matches!(service.delete_all().await, Err(StoreError::Unavailable(_))));

        backend.down.store(false, Ordering::SeqCst);
        assert_eq!(texts(&service.list().await.unwrap()), vec!["before outage"]);
    }

    #[tokio::test]
    async fn key_prefix_namespaces_records_and_index() {
        let backend = Arc::new(MemoryBackend::new());
        let options = StoreOptions {
            key_prefix: "test:".to_string(),
            ..StoreOptions::default()
        };
        let service = TodoService::new(backend.clone(), options);
        let todo = service.add("scoped").await.unwrap();

        assert_eq!(backend.list_range("test:todos").await.unwrap(), vec![todo.id.clone()]);
        assert!(!backend.get_hash(&format!("test:todo:{}", todo.id)).await.unwrap().is_empty());
        assert!(backend.list_range("todos").await.unwrap().is_empty());
    }
}
