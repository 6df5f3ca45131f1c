//! Hierarchy flattening and capacity assessment.
//!
//! The orchestrator walks caller-supplied capacity links in order,
//! validates each top-level link's reservation once, expands coarse links
//! down to health-isolated sub-blocks when flattening is requested, and
//! aggregates an ordered, de-duplicated list of free-slice counts.
//! Recursion occurs in exactly one place (reservation → its blocks) and is
//! bounded to depth 2.

use std::collections::HashSet;

use tracing::{debug, warn};

use slice_core::{CapacityLink, ReservationCapacity, SystemCharacteristics};
use slicegrid_inventory::{FetchCache, ReservationAccessor};

use crate::error::{CapacityError, CapacityResult};
use crate::slices::{count_reservation_slices, count_sub_block_slices};
use crate::validator::{ExecutionMode, validate_reservation};

/// Assess how many slices are free under each of the given links.
///
/// Links are processed sequentially in input order, fail-fast: the first
/// fetch failure, configuration mismatch, or capacity-less top-level link
/// aborts the whole call. On success the result preserves first-seen order
/// with structural duplicates removed.
///
/// `machines_per_slice` overrides the system default so callers can size
/// the slice footprint per request. With `flatten_to_sub_blocks`,
/// reservation- and block-level links are expanded to their healthy
/// sub-blocks so a slice never straddles a failure-domain boundary.
pub fn assess_available_slices(
    accessor: &dyn ReservationAccessor,
    links: &[CapacityLink],
    flatten_to_sub_blocks: bool,
    system: &SystemCharacteristics,
    machines_per_slice: u64,
    mode: ExecutionMode,
) -> CapacityResult<Vec<ReservationCapacity>> {
    let assessment = Assessment {
        inventory: FetchCache::new(accessor),
        system,
        machines_per_slice,
        mode,
        flatten: flatten_to_sub_blocks,
    };
    let capacities = assessment.assess(links, true)?;
    Ok(dedup_preserving_order(capacities))
}

/// One top-level assessment call: the fetch cache lives exactly as long
/// as this value.
struct Assessment<'a> {
    inventory: FetchCache<'a>,
    system: &'a SystemCharacteristics,
    machines_per_slice: u64,
    mode: ExecutionMode,
    flatten: bool,
}

impl Assessment<'_> {
    /// Walk `links` in order, accumulating capacity entries.
    ///
    /// `validate` is true only for caller-supplied top-level links. For
    /// those, the owning reservation is validated once and a link that
    /// contributes nothing is a hard `NoCapacity` error. Links synthesized
    /// during flattening recurse with `validate = false`, where an empty
    /// contribution is fine.
    fn assess(&self, links: &[CapacityLink], validate: bool) -> CapacityResult<Vec<ReservationCapacity>> {
        let mut capacities = Vec::new();
        for link in links {
            if validate {
                let reservation = self.inventory.describe(link)?;
                validate_reservation(&self.inventory, &reservation, self.system, self.mode)?;
            }

            let entries = self.assess_link(link)?;
            if entries.is_empty() && validate {
                warn!(reservation = %link.path(), "no available capacity");
                return Err(CapacityError::NoCapacity { path: link.path() });
            }
            capacities.extend(entries);
        }
        Ok(capacities)
    }

    fn assess_link(&self, link: &CapacityLink) -> CapacityResult<Vec<ReservationCapacity>> {
        match link {
            CapacityLink::SubBlock { .. } => self.assess_sub_block(link),
            CapacityLink::Block { .. } if self.flatten => self.flatten_block(link),
            CapacityLink::Reservation { .. } if self.flatten => {
                let blocks = self.inventory.list_blocks(link)?;
                if blocks.is_empty() {
                    // No blocks to flatten into: account the reservation whole.
                    return self.assess_whole_reservation(link);
                }
                debug!(
                    reservation = %link.path(),
                    blocks = blocks.len(),
                    "flattening reservation into blocks"
                );
                let block_links: Vec<CapacityLink> =
                    blocks.iter().map(|block| link.child_block(block)).collect();
                self.assess(&block_links, false)
            }
            _ => self.assess_whole_reservation(link),
        }
    }

    /// A sub-block link is always health-checked individually: its listing
    /// must come back with at most one record.
    fn assess_sub_block(&self, link: &CapacityLink) -> CapacityResult<Vec<ReservationCapacity>> {
        let sub_blocks = self.inventory.list_healthy_sub_blocks(link)?;

        if sub_blocks.is_empty() {
            debug!(sub_block = %link.path(), "sub-block is not healthy");
            return Ok(Vec::new());
        }
        if sub_blocks.len() > 1 {
            return Err(CapacityError::Invariant(format!(
                "sub-block lookup for '{}' returned {} records",
                link.path(),
                sub_blocks.len()
            )));
        }

        let sub_block = &sub_blocks[0];
        check_sub_block_lineage(link, &sub_block.link)?;

        let slices = count_sub_block_slices(sub_block, self.machines_per_slice)?;
        Ok(if slices > 0 {
            vec![ReservationCapacity { link: link.clone(), available_slices: slices }]
        } else {
            Vec::new()
        })
    }

    /// Expand a block into one capacity entry per healthy, fitting
    /// sub-block, preserving provider order. An empty listing means no
    /// healthy capacity, not an error.
    fn flatten_block(&self, link: &CapacityLink) -> CapacityResult<Vec<ReservationCapacity>> {
        let sub_blocks = self.inventory.list_healthy_sub_blocks(link)?;

        let mut capacities = Vec::new();
        for sub_block in &sub_blocks {
            check_sub_block_lineage(link, &sub_block.link)?;
            let slices = count_sub_block_slices(sub_block, self.machines_per_slice)?;
            if slices > 0 {
                capacities.push(ReservationCapacity {
                    link: sub_block.link.clone(),
                    available_slices: slices,
                });
            }
        }
        debug!(
            block = %link.path(),
            healthy = sub_blocks.len(),
            fitting = capacities.len(),
            "flattened block into sub-blocks"
        );
        Ok(capacities)
    }

    fn assess_whole_reservation(&self, link: &CapacityLink) -> CapacityResult<Vec<ReservationCapacity>> {
        let reservation = self.inventory.describe(link)?;
        let slices = count_reservation_slices(
            &self.inventory,
            &reservation,
            self.system,
            self.machines_per_slice,
        )?;
        Ok(if slices > 0 {
            vec![ReservationCapacity { link: link.clone(), available_slices: slices }]
        } else {
            Vec::new()
        })
    }
}

/// A listed sub-block must belong to the reservation and block it was
/// requested under.
fn check_sub_block_lineage(
    requested: &CapacityLink,
    listed: &CapacityLink,
) -> CapacityResult<()> {
    let consistent = listed.reservation_link() == requested.reservation_link()
        && listed.block_name() == requested.block_name();
    if !consistent {
        return Err(CapacityError::Invariant(format!(
            "sub-block '{}' listed under '{}' does not belong to it",
            listed.path(),
            requested.path()
        )));
    }
    Ok(())
}

fn dedup_preserving_order(capacities: Vec<ReservationCapacity>) -> Vec<ReservationCapacity> {
    let mut seen = HashSet::new();
    capacities
        .into_iter()
        .filter(|capacity| seen.insert(capacity.clone()))
        .collect()
}
