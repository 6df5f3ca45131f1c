//! Capacity engine error types.

use thiserror::Error;

use slicegrid_inventory::InventoryError;

/// Errors that abort a capacity assessment.
///
/// Lower-level pieces (matcher, validator, calculator) return these as
/// typed outcomes; the assessor is the only place an outcome aborts the
/// whole call. Partial results are never returned alongside an error.
#[derive(Debug, Error)]
pub enum CapacityError {
    /// The accessor could not retrieve a record.
    #[error(transparent)]
    Fetch(#[from] InventoryError),

    /// Reservation hardware does not match the requested system.
    #[error("reservation '{path}' does not match the requested system: {detail}")]
    ConfigMismatch { path: String, detail: String },

    /// A validated top-level link legitimately has zero free slices.
    /// Distinct from a fetch failure, but still a hard error: the caller
    /// cannot proceed without capacity.
    #[error("reservation '{path}' has no available capacity")]
    NoCapacity { path: String },

    /// An implementation-bug signal (e.g. a sub-block lookup returning
    /// several records), not a user-facing condition.
    #[error("capacity invariant violated: {0}")]
    Invariant(String),
}

impl CapacityError {
    /// Process exit code for callers that report `(capacity list, code)`.
    /// Every failure maps to 1; success is 0 by construction.
    pub fn code(&self) -> i32 {
        1
    }
}

pub type CapacityResult<T> = Result<T, CapacityError>;
