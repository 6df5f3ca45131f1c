//! slicegrid-inventory — the seam between the capacity engine and the
//! provider's reservation/inventory API.
//!
//! The engine never talks to a transport directly; it consumes the
//! [`ReservationAccessor`] trait. This crate provides:
//!
//! - The accessor trait and its error type ([`InventoryError`])
//! - [`FetchCache`], a request-scoped memoization wrapper (one per
//!   assessment call, never longer-lived)
//! - [`MockInventory`], an in-memory accessor for tests with failure
//!   injection and call counting

pub mod accessor;
pub mod cache;
pub mod error;
pub mod mock;

pub use accessor::ReservationAccessor;
pub use cache::FetchCache;
pub use error::{InventoryError, InventoryResult};
pub use mock::{MockBlock, MockInventory, MockSubBlock};
