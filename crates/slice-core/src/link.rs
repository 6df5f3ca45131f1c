//! Capacity links — addressable units in the reservation hierarchy.
//!
//! A link names a point in the provider's containment hierarchy:
//! reservation → block → sub-block. Links are immutable value objects;
//! structural equality is what de-duplication and fetch caching key on.

use serde::{Deserialize, Serialize};

/// An addressable unit of reserved capacity.
///
/// Every variant carries the owning `project`, reservation `name`, and
/// `zone`. The `Block` and `SubBlock` variants narrow the target to a
/// health-isolated partition of the reservation's physical capacity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityLink {
    /// The coarsest addressable unit: a whole reservation.
    Reservation {
        project: String,
        name: String,
        zone: String,
    },
    /// A block within a reservation.
    Block {
        project: String,
        name: String,
        zone: String,
        block: String,
    },
    /// A sub-block within a block — the finest addressable unit,
    /// always health-checked individually.
    SubBlock {
        project: String,
        name: String,
        zone: String,
        block: String,
        sub_block: String,
    },
}

impl CapacityLink {
    pub fn reservation(
        project: impl Into<String>,
        name: impl Into<String>,
        zone: impl Into<String>,
    ) -> Self {
        CapacityLink::Reservation {
            project: project.into(),
            name: name.into(),
            zone: zone.into(),
        }
    }

    pub fn block(
        project: impl Into<String>,
        name: impl Into<String>,
        zone: impl Into<String>,
        block: impl Into<String>,
    ) -> Self {
        CapacityLink::Block {
            project: project.into(),
            name: name.into(),
            zone: zone.into(),
            block: block.into(),
        }
    }

    pub fn sub_block(
        project: impl Into<String>,
        name: impl Into<String>,
        zone: impl Into<String>,
        block: impl Into<String>,
        sub_block: impl Into<String>,
    ) -> Self {
        CapacityLink::SubBlock {
            project: project.into(),
            name: name.into(),
            zone: zone.into(),
            block: block.into(),
            sub_block: sub_block.into(),
        }
    }

    pub fn project(&self) -> &str {
        match self {
            CapacityLink::Reservation { project, .. }
            | CapacityLink::Block { project, .. }
            | CapacityLink::SubBlock { project, .. } => project,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CapacityLink::Reservation { name, .. }
            | CapacityLink::Block { name, .. }
            | CapacityLink::SubBlock { name, .. } => name,
        }
    }

    pub fn zone(&self) -> &str {
        match self {
            CapacityLink::Reservation { zone, .. }
            | CapacityLink::Block { zone, .. }
            | CapacityLink::SubBlock { zone, .. } => zone,
        }
    }

    /// Block name, if this link is block- or sub-block-scoped.
    pub fn block_name(&self) -> Option<&str> {
        match self {
            CapacityLink::Reservation { .. } => None,
            CapacityLink::Block { block, .. } | CapacityLink::SubBlock { block, .. } => {
                Some(block)
            }
        }
    }

    /// Sub-block name, if this link is sub-block-scoped.
    pub fn sub_block_name(&self) -> Option<&str> {
        match self {
            CapacityLink::SubBlock { sub_block, .. } => Some(sub_block),
            _ => None,
        }
    }

    /// Coarsen to the owning reservation-level link.
    ///
    /// Used as the identity key for reservation fetch memoization: every
    /// link under the same reservation describes the same record.
    pub fn reservation_link(&self) -> CapacityLink {
        CapacityLink::reservation(self.project(), self.name(), self.zone())
    }

    /// Derive the link for a named block under this link's reservation.
    pub fn child_block(&self, block: impl Into<String>) -> CapacityLink {
        CapacityLink::block(self.project(), self.name(), self.zone(), block)
    }

    /// Provider-style resource path, for diagnostics and error messages.
    pub fn path(&self) -> String {
        let mut path = format!(
            "projects/{}/zones/{}/reservations/{}",
            self.project(),
            self.zone(),
            self.name()
        );
        if let Some(block) = self.block_name() {
            path.push_str("/blocks/");
            path.push_str(block);
        }
        if let Some(sub_block) = self.sub_block_name() {
            path.push_str("/subBlocks/");
            path.push_str(sub_block);
        }
        path
    }
}
