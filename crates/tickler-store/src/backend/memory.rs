// ABOUTME: In-process Backend with Redis-like passive key expiry, for tests and local development.
// ABOUTME: Expired hashes are dropped lazily when touched; nothing is notified when a key expires.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{Backend, BackendError, Fields};

#[derive(Debug)]
struct HashEntry {
    fields: Fields,
    expires_at: Option<Instant>,
}

impl HashEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Default)]
struct Inner {
    hashes: HashMap<String, HashEntry>,
    lists: HashMap<String, Vec<String>>,
}

impl Inner {
    /// Look up a live hash, evicting it first if its deadline has passed.
    fn live_hash(&mut self, key: &str) -> Option<&mut HashEntry> {
        let now = Instant::now();
        if self.hashes.get(key).is_some_and(|e| e.is_expired(now)) {
            self.hashes.remove(key);
        }
        self.hashes.get_mut(key)
    }
}

/// Backend holding everything in process memory. Deadlines use tokio's
/// clock, so tests running with paused time can elapse TTLs instantly.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left before `key` expires, or `None` if it is absent or has no deadline.
    pub async fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let mut inner = self.inner.lock().await;
        let entry = inner.live_hash(key)?;
        entry
            .expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn put_hash(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        let expires_at = Some(Instant::now() + ttl);
        match inner.live_hash(key) {
            Some(entry) => {
                entry.fields.extend(fields.iter().cloned());
                entry.expires_at = expires_at;
            }
            None => {
                inner.hashes.insert(
                    key.to_string(),
                    HashEntry {
                        fields: fields.iter().cloned().collect(),
                        expires_at,
                    },
                );
            }
        }
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> Result<Fields, BackendError> {
        let mut inner = self.inner.lock().await;
        Ok(inner
            .live_hash(key)
            .map(|entry| entry.fields.clone())
            .unwrap_or_default())
    }

    async fn update_hash_if_exists(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<bool, BackendError> {
        let mut inner = self.inner.lock().await;
        match inner.live_hash(key) {
            Some(entry) => {
                entry.fields.extend(fields.iter().cloned());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        inner
            .lists
            .entry(key.to_string())
            .or_default()
            .insert(0, value.to_string());
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, BackendError> {
        let inner = self.inner.lock().await;
        Ok(inner.lists.get(key).cloned().unwrap_or_default())
    }

    async fn list_remove(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        let emptied = match inner.lists.get_mut(key) {
            Some(list) => {
                list.retain(|v| v != value);
                list.is_empty()
            }
            None => false,
        };
        // Redis drops a list once its last element is removed
        if emptied {
            inner.lists.remove(key);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().await;
        inner.hashes.remove(key);
        inner.lists.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn hash_expires_after_ttl() {
        let backend = MemoryBackend::new();
        backend
            .put_hash("k", &fields(&[("a", "1")]), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(backend.get_hash("k").await.unwrap().get("a").unwrap(), "1");

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(backend.get_hash("k").await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn guarded_update_keeps_deadline() {
        let backend = MemoryBackend::new();
        backend
            .put_hash("k", &fields(&[("a", "1")]), Duration::from_secs(10))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        let updated = backend
            .update_hash_if_exists("k", &fields(&[("a", "2")]))
            .await
            .unwrap();
        assert!(updated);
        assert_eq!(
            backend.remaining_ttl("k").await,
            Some(Duration::from_secs(6))
        );
    }

    #[tokio::test]
    async fn guarded_update_does_not_create_key() {
        let backend = MemoryBackend::new();
        let updated = backend
            .update_hash_if_exists("missing", &fields(&[("a", "1")]))
            .await
            .unwrap();

        assert!(!updated);
        assert!(backend.get_hash("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_push_front_and_remove_all_occurrences() {
        let backend = MemoryBackend::new();
        for v in ["a", "b", "a", "c"] {
            backend.list_push_front("l", v).await.unwrap();
        }
        assert_eq!(backend.list_range("l").await.unwrap(), vec!["c", "a", "b", "a"]);

        backend.list_remove("l", "a").await.unwrap();
        assert_eq!(backend.list_range("l").await.unwrap(), vec!["c", "b"]);

        backend.list_remove("l", "missing").await.unwrap();
        assert_eq!(backend.list_range("l").await.unwrap(), vec!["c", "b"]);
    }

    #[tokio::test]
    async fn delete_is_idempotent_for_any_key_type() {
        let backend = MemoryBackend::new();
        backend.list_push_front("l", "x").await.unwrap();
        backend
            .put_hash("h", &fields(&[("a", "1")]), Duration::from_secs(60))
            .await
            .unwrap();

        backend.delete("l").await.unwrap();
        backend.delete("h").await.unwrap();
        backend.delete("h").await.unwrap();

        assert!(backend.list_range("l").await.unwrap().is_empty());
        assert!(backend.get_hash("h").await.unwrap().is_empty());
    }
}
