//! In-memory accessor for tests.
//!
//! Mirrors the provider's behavior closely enough for the capacity engine's
//! tests: one reservation payload served for any describe, a block/sub-block
//! topology for listings, per-operation failure injection, and call counters
//! (the matcher-ordering tests assert on `resolve_calls`).

use std::cell::Cell;

use anyhow::anyhow;

use slice_core::{
    AggregateReservation, CapacityLink, Reservation, SpecificReservation, SubBlockInfo,
};

use crate::accessor::ReservationAccessor;
use crate::error::{InventoryError, InventoryResult};

/// A sub-block in the mock topology.
#[derive(Debug, Clone)]
pub struct MockSubBlock {
    pub name: String,
    pub count: u64,
    pub in_use_count: u64,
}

impl MockSubBlock {
    pub fn new(name: impl Into<String>, count: u64, in_use_count: u64) -> Self {
        Self { name: name.into(), count, in_use_count }
    }
}

/// A block in the mock topology. Sub-blocks listed here are the healthy
/// ones; an empty list models a block with no healthy sub-blocks.
#[derive(Debug, Clone)]
pub struct MockBlock {
    pub name: String,
    pub sub_blocks: Vec<MockSubBlock>,
}

impl MockBlock {
    pub fn new(name: impl Into<String>, sub_blocks: Vec<MockSubBlock>) -> Self {
        Self { name: name.into(), sub_blocks }
    }
}

/// In-memory [`ReservationAccessor`] with failure injection.
#[derive(Default)]
pub struct MockInventory {
    specific: Option<SpecificReservation>,
    aggregate: Option<AggregateReservation>,
    blocks: Vec<MockBlock>,
    project_number: Option<String>,
    fail_describe: bool,
    fail_list_blocks: bool,
    fail_list_sub_blocks: bool,
    describe_count: Cell<u64>,
    resolve_count: Cell<u64>,
}

impl MockInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specific(mut self, specific: SpecificReservation) -> Self {
        self.specific = Some(specific);
        self
    }

    pub fn with_aggregate(mut self, aggregate: AggregateReservation) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<MockBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Project number returned by `resolve_project_number`. When unset,
    /// resolution fails — tests asserting the resolver is never reached
    /// leave it unset.
    pub fn with_project_number(mut self, number: impl Into<String>) -> Self {
        self.project_number = Some(number.into());
        self
    }

    pub fn fail_on_describe(mut self) -> Self {
        self.fail_describe = true;
        self
    }

    pub fn fail_on_list_blocks(mut self) -> Self {
        self.fail_list_blocks = true;
        self
    }

    pub fn fail_on_list_sub_blocks(mut self) -> Self {
        self.fail_list_sub_blocks = true;
        self
    }

    /// How many times `describe` hit this accessor.
    pub fn describe_calls(&self) -> u64 {
        self.describe_count.get()
    }

    /// How many times `resolve_project_number` hit this accessor.
    pub fn resolve_calls(&self) -> u64 {
        self.resolve_count.get()
    }

    fn block(&self, name: &str) -> Option<&MockBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

impl ReservationAccessor for MockInventory {
    fn describe(&self, link: &CapacityLink) -> InventoryResult<Reservation> {
        self.describe_count.set(self.describe_count.get() + 1);
        if self.fail_describe {
            return Err(InventoryError::Fetch {
                path: link.path(),
                source: anyhow!("injected describe failure"),
            });
        }
        Ok(Reservation {
            link: link.reservation_link(),
            status: "READY".to_string(),
            specific: self.specific.clone(),
            aggregate: self.aggregate.clone(),
        })
    }

    fn list_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<String>> {
        if self.fail_list_blocks {
            return Err(InventoryError::Fetch {
                path: link.path(),
                source: anyhow!("injected block listing failure"),
            });
        }
        Ok(self.blocks.iter().map(|b| b.name.clone()).collect())
    }

    fn list_healthy_sub_blocks(&self, link: &CapacityLink) -> InventoryResult<Vec<SubBlockInfo>> {
        if self.fail_list_sub_blocks {
            return Err(InventoryError::Fetch {
                path: link.path(),
                source: anyhow!("injected sub-block listing failure"),
            });
        }

        let Some(block_name) = link.block_name() else {
            // Listing sub-blocks needs at least a block-scoped link.
            return Err(InventoryError::Fetch {
                path: link.path(),
                source: anyhow!("sub-block listing requires a block or sub-block link"),
            });
        };

        let Some(block) = self.block(block_name) else {
            return Ok(Vec::new());
        };

        let infos = block
            .sub_blocks
            .iter()
            .filter(|sb| match link.sub_block_name() {
                Some(requested) => sb.name == requested,
                None => true,
            })
            .map(|sb| SubBlockInfo {
                link: CapacityLink::sub_block(
                    link.project(),
                    link.name(),
                    link.zone(),
                    block_name,
                    &sb.name,
                ),
                count: sb.count,
                in_use_count: sb.in_use_count,
            })
            .collect();
        Ok(infos)
    }

    fn resolve_project_number(&self, project_id: &str) -> InventoryResult<String> {
        self.resolve_count.set(self.resolve_count.get() + 1);
        match &self.project_number {
            Some(number) => Ok(number.clone()),
            None => Err(InventoryError::ProjectLookup {
                project: project_id.to_string(),
                source: anyhow!("no project number configured in mock"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_block_link_filters_listing() {
        let mock = MockInventory::new().with_blocks(vec![MockBlock::new(
            "block",
            vec![
                MockSubBlock::new("sub1", 4, 1),
                MockSubBlock::new("sub2", 6, 1),
            ],
        )]);

        let link = CapacityLink::sub_block("p", "r", "z", "block", "sub2");
        let listed = mock.list_healthy_sub_blocks(&link).unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].count, 6);
        assert_eq!(listed[0].link.sub_block_name(), Some("sub2"));
    }

    #[test]
    fn block_link_lists_all_sub_blocks_in_order() {
        let mock = MockInventory::new().with_blocks(vec![MockBlock::new(
            "block",
            vec![
                MockSubBlock::new("sub1", 4, 1),
                MockSubBlock::new("sub2", 6, 1),
            ],
        )]);

        let link = CapacityLink::block("p", "r", "z", "block");
        let listed = mock.list_healthy_sub_blocks(&link).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].link.sub_block_name(), Some("sub1"));
        assert_eq!(listed[1].link.sub_block_name(), Some("sub2"));
    }

    #[test]
    fn unknown_block_lists_empty() {
        let mock = MockInventory::new();
        let link = CapacityLink::block("p", "r", "z", "missing");
        assert!(mock.list_healthy_sub_blocks(&link).unwrap().is_empty());
    }

    #[test]
    fn unconfigured_project_number_errors() {
        let mock = MockInventory::new();
        let err = mock.resolve_project_number("p").unwrap_err();
        assert!(matches!(err, InventoryError::ProjectLookup { .. }));
        assert_eq!(mock.resolve_calls(), 1);
    }
}
