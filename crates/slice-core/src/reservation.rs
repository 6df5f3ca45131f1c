//! Reservation records and capacity results.
//!
//! These are immutable snapshots of a point-in-time provider query. The
//! provider's describe payloads use camelCase field names, mirrored here
//! with serde renames so records deserialize straight off the wire.

use serde::{Deserialize, Serialize};

use crate::link::CapacityLink;

/// One accelerator resource entry in a reservation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceleratorResource {
    pub accelerator_type: String,
    #[serde(default)]
    pub accelerator_count: u64,
}

/// Machine-denominated reservation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificReservation {
    pub count: u64,
    pub in_use_count: u64,
    pub machine_type: String,
    /// Guest accelerator descriptors (populated for GPU reservations).
    #[serde(default)]
    pub guest_accelerators: Vec<AcceleratorResource>,
}

/// Accelerator-chip-denominated reservation payload.
///
/// Resource lists are ordered as the provider returned them; the matcher
/// relies on that order when picking the first matching entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReservation {
    pub reserved_resources: Vec<AcceleratorResource>,
    pub in_use_resources: Vec<AcceleratorResource>,
}

/// The fetched record for a reservation-level identifier.
///
/// At most one of `specific` / `aggregate` is populated. A record with
/// neither payload is malformed or still provisioning; it carries zero
/// usable capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation-level link this record was fetched for.
    pub link: CapacityLink,
    /// Provider status string (e.g. "READY"). Carried as data, not
    /// interpreted by the capacity engine.
    pub status: String,
    pub specific: Option<SpecificReservation>,
    pub aggregate: Option<AggregateReservation>,
}

impl Reservation {
    /// Whether either payload shape is populated.
    pub fn is_populated(&self) -> bool {
        self.specific.is_some() || self.aggregate.is_some()
    }
}

/// Health and usage for a single sub-block.
///
/// Presence in the provider's listing implies health; an absent sub-block
/// is an unhealthy one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBlockInfo {
    /// Back-reference to the owning sub-block.
    pub link: CapacityLink,
    pub count: u64,
    pub in_use_count: u64,
}

/// Assessment output unit: a link and the slices currently free under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationCapacity {
    pub link: CapacityLink,
    pub available_slices: u64,
}
