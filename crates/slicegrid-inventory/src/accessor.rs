//! The read-only provider accessor trait.

use slice_core::{CapacityLink, Reservation, SubBlockInfo};

use crate::error::InventoryResult;

/// Read-only access to the provider's reservation inventory.
///
/// All operations are blocking; timeouts, transport, and authentication
/// belong to the implementation, not to this layer. Implementations must
/// preserve provider-returned list ordering — the capacity engine treats
/// it as significant.
pub trait ReservationAccessor {
    /// Describe the reservation owning `link`.
    ///
    /// Any link variant resolves to its reservation-level record; block
    /// and sub-block qualifiers are ignored for this lookup.
    fn describe(&self, link: &CapacityLink) -> InventoryResult<Reservation>;

    /// Block names under the reservation, in provider order.
    /// An empty list is valid: the reservation has no blocks.
    fn list_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<String>>;

    /// Healthy sub-blocks under a block link, or the listing filtered to
    /// one sub-block for a sub-block link. An empty list is valid: no
    /// healthy sub-blocks. Health is implied by presence in the listing.
    fn list_healthy_sub_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<SubBlockInfo>>;

    /// Numeric project number for a project ID.
    fn resolve_project_number(&self, project_id: &str) -> InventoryResult<String>;
}
