//! Slice-count arithmetic.
//!
//! Converts raw capacity/in-use counts into whole schedulable slices.
//! Specific reservations are machine-denominated; aggregate reservations
//! are chip-denominated, so their divisor carries `chips_per_machine`.
//! Floor division throughout; counts never go negative.

use slice_core::{Reservation, SubBlockInfo, SystemCharacteristics};
use slicegrid_inventory::FetchCache;

use crate::error::{CapacityError, CapacityResult};
use crate::matcher::find_matching_resource;

/// Whole slices currently free in a reservation record.
///
/// For aggregate reservations the matching resource must exist —
/// validation is supposed to have established that — so a missing match
/// here fails loudly as an invariant violation.
pub fn count_reservation_slices(
    inventory: &FetchCache<'_>,
    reservation: &Reservation,
    system: &SystemCharacteristics,
    machines_per_slice: u64,
) -> CapacityResult<u64> {
    let (count, in_use_count, divisor) = if let Some(specific) = &reservation.specific {
        (specific.count, specific.in_use_count, machines_per_slice)
    } else if let Some(aggregate) = &reservation.aggregate {
        let matching = find_matching_resource(inventory, reservation, system)?.ok_or_else(|| {
            CapacityError::Invariant(format!(
                "aggregate reservation '{}' reached slice counting without a matching \
                 resource for '{}'",
                reservation.link.path(),
                system.accelerator
            ))
        })?;
        let in_use = aggregate
            .in_use_resources
            .iter()
            .find(|r| r.accelerator_type == matching.accelerator_type)
            .map(|r| r.accelerator_count)
            .unwrap_or(0);
        (
            matching.accelerator_count,
            in_use,
            machines_per_slice * system.chips_per_machine,
        )
    } else {
        // Malformed or still-provisioning record: zero capacity.
        return Ok(0);
    };

    floor_divide(count.saturating_sub(in_use_count), divisor)
}

/// Whole slices currently free in a single healthy sub-block.
pub fn count_sub_block_slices(
    sub_block: &SubBlockInfo,
    machines_per_slice: u64,
) -> CapacityResult<u64> {
    floor_divide(
        sub_block.count.saturating_sub(sub_block.in_use_count),
        machines_per_slice,
    )
}

fn floor_divide(available: u64, divisor: u64) -> CapacityResult<u64> {
    if divisor == 0 {
        return Err(CapacityError::Invariant(
            "slice divisor is zero (machines_per_slice and chips_per_machine must be >= 1)"
                .to_string(),
        ));
    }
    Ok(available / divisor)
}
