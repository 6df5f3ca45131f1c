//! Accelerator resource matching for aggregate reservations.
//!
//! Aggregate reservations denominate capacity in accelerator chips, keyed
//! by provider accelerator-type identifiers. TPU identifiers are fully
//! qualified (`projects/…/zones/…/acceleratorTypes/…`) and the project
//! segment may appear as either the project ID or the numeric project
//! number, depending on which naming scheme the provider response uses.

use slice_core::{AcceleratorKind, AcceleratorResource, Reservation, SystemCharacteristics};
use slicegrid_inventory::FetchCache;

use crate::error::CapacityResult;

/// Find the reserved resource entry matching the requested system.
///
/// Only meaningful for aggregate reservations; `Ok(None)` otherwise.
///
/// For TPU systems the lookup is a two-step attempt sequence: the
/// project-ID form is tried first, and only if it matches nothing is the
/// project number resolved and tried. The order is a behavioral contract
/// (the resolver must not be invoked when the literal form matches), not
/// an optimization. Non-TPU systems match on the bare accelerator
/// identifier with no project/zone qualification.
///
/// Returns the first matching entry; provider list order is preserved.
pub fn find_matching_resource<'r>(
    inventory: &FetchCache<'_>,
    reservation: &'r Reservation,
    system: &SystemCharacteristics,
) -> CapacityResult<Option<&'r AcceleratorResource>> {
    let Some(aggregate) = &reservation.aggregate else {
        return Ok(None);
    };
    let reserved = &aggregate.reserved_resources;

    if system.accelerator_kind != AcceleratorKind::Tpu {
        return Ok(reserved
            .iter()
            .find(|r| r.accelerator_type == system.accelerator));
    }

    let project = reservation.link.project();
    let zone = reservation.link.zone();

    // Try with the project ID:
    let by_id = accelerator_type_path(project, zone, &system.accelerator);
    if let Some(resource) = reserved.iter().find(|r| r.accelerator_type == by_id) {
        return Ok(Some(resource));
    }

    // Try with the project number:
    let number = inventory.resolve_project_number(project)?;
    let by_number = accelerator_type_path(&number, zone, &system.accelerator);
    Ok(reserved
        .iter()
        .find(|r| r.accelerator_type == by_number))
}

fn accelerator_type_path(project: &str, zone: &str, accelerator: &str) -> String {
    format!("projects/{project}/zones/{zone}/acceleratorTypes/{accelerator}")
}
