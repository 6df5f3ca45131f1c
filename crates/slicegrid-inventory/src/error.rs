//! Inventory error types.

use thiserror::Error;

/// Errors from the provider accessor.
///
/// Transient provider failures are not retried at this layer; the
/// transport (or the human re-running the command) owns retries.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to fetch '{path}': {source}")]
    Fetch {
        /// Provider-style path of the record that could not be fetched.
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to resolve project number for '{project}': {source}")]
    ProjectLookup {
        project: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type InventoryResult<T> = Result<T, InventoryError>;
