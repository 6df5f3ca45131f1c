//! slicegrid-capacity — read-time capacity assessment over hierarchical
//! reservations.
//!
//! Given a set of capacity links and a requested system shape, the engine
//! answers one question: how many slices are free, and under exactly which
//! health-isolated unit? The pieces:
//!
//! - [`matcher`] — finds the accelerator resource in an aggregate
//!   reservation that corresponds to the requested system
//! - [`validator`] — checks a fetched reservation's hardware against the
//!   requested system before any count is trusted
//! - [`slices`] — converts raw capacity/in-use counts into whole slices
//! - [`assessor`] — the orchestrator: flattens reservations down to blocks
//!   and sub-blocks, applies the validator and calculator, and aggregates
//!   an ordered, de-duplicated capacity list
//!
//! # Architecture
//!
//! ```text
//! assess_available_slices
//!   ├── FetchCache (one per call; memoizes describe + project lookup)
//!   ├── validator (top-level links only, skipped on recursion)
//!   │     └── matcher (aggregate reservations)
//!   └── per-link dispatch
//!         ├── SubBlock       → single healthy-sub-block count
//!         ├── Block+flatten  → one entry per healthy sub-block
//!         ├── Res+flatten    → recurse over block links (depth ≤ 2)
//!         └── otherwise      → whole-reservation count
//! ```

pub mod assessor;
pub mod error;
pub mod matcher;
pub mod slices;
pub mod validator;

pub use assessor::assess_available_slices;
pub use error::{CapacityError, CapacityResult};
pub use matcher::find_matching_resource;
pub use slices::{count_reservation_slices, count_sub_block_slices};
pub use validator::{ExecutionMode, validate_reservation};
