// ABOUTME: Error type for record store and composite to-do operations.
// ABOUTME: Separates caller mistakes (validation) from backing-store unavailability.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by the store. A missing record is not an error; lookups
/// return `None` for it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[from] BackendError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
