// ABOUTME: Ephemeral indexed record store for tickler, built over a pluggable key-value backend.
// ABOUTME: Provides TTL-bounded records, the newest-first id index, lazy reconciliation, and Redis/in-memory backends.

pub mod backend;
pub mod error;
pub mod index;
pub mod keys;
pub mod record;
pub mod service;

pub use backend::{Backend, BackendError, MemoryBackend, RedisBackend};
pub use error::StoreError;
pub use index::TodoIndex;
pub use keys::KeySpace;
pub use record::RecordStore;
pub use service::{DEFAULT_RECORD_TTL, StoreOptions, TodoService};
