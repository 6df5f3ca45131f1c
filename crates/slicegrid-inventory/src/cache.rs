//! Request-scoped fetch memoization.
//!
//! Flattening revisits the same reservation record several times (once to
//! validate, once per accounting path). `FetchCache` memoizes `describe`
//! and `resolve_project_number` so each record is fetched at most once per
//! assessment. The cache is owned by a single top-level assessment call
//! and must not outlive it — capacity data goes stale the moment the call
//! returns.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use slice_core::{CapacityLink, Reservation, SubBlockInfo};

use crate::accessor::ReservationAccessor;
use crate::error::InventoryResult;

/// Memoizing wrapper around a [`ReservationAccessor`].
///
/// Assessment is single-threaded and sequential, so plain `RefCell`
/// interior mutability is sufficient. Sub-block listings are deliberately
/// not cached: health is re-read on every listing.
pub struct FetchCache<'a> {
    accessor: &'a dyn ReservationAccessor,
    reservations: RefCell<HashMap<CapacityLink, Reservation>>,
    project_numbers: RefCell<HashMap<String, String>>,
}

impl<'a> FetchCache<'a> {
    pub fn new(accessor: &'a dyn ReservationAccessor) -> Self {
        Self {
            accessor,
            reservations: RefCell::new(HashMap::new()),
            project_numbers: RefCell::new(HashMap::new()),
        }
    }

    /// Describe the reservation owning `link`, memoized by the
    /// reservation-level identity of the link.
    pub fn describe(&self, link: &CapacityLink) -> InventoryResult<Reservation> {
        let key = link.reservation_link();
        if let Some(cached) = self.reservations.borrow().get(&key) {
            debug!(reservation = %key.path(), "reservation describe served from cache");
            return Ok(cached.clone());
        }
        let reservation = self.accessor.describe(link)?;
        self.reservations
            .borrow_mut()
            .insert(key, reservation.clone());
        Ok(reservation)
    }

    pub fn list_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<String>> {
        self.accessor.list_blocks(link)
    }

    pub fn list_healthy_sub_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<SubBlockInfo>> {
        self.accessor.list_healthy_sub_blocks(link)
    }

    /// Resolve a project ID to its project number, memoized per ID.
    pub fn resolve_project_number(&self, project_id: &str) -> InventoryResult<String> {
        if let Some(cached) = self.project_numbers.borrow().get(project_id) {
            return Ok(cached.clone());
        }
        let number = self.accessor.resolve_project_number(project_id)?;
        self.project_numbers
            .borrow_mut()
            .insert(project_id.to_string(), number.clone());
        Ok(number)
    }
}
