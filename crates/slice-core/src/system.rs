//! Requested workload hardware shape.

use serde::{Deserialize, Serialize};

/// Accelerator category of the requested system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceleratorKind {
    Tpu,
    Gpu,
    Cpu,
}

/// Hardware shape of the requested workload.
///
/// `machines_per_slice` is the default slice footprint for this system;
/// the assessment entry point takes an explicit override so callers can
/// size slices per request (e.g. a multi-node GPU job).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemCharacteristics {
    pub accelerator_kind: AcceleratorKind,
    /// Accelerator identifier as the provider names it (e.g. the
    /// accelerator-type suffix for TPU, the guest accelerator name for GPU).
    pub accelerator: String,
    /// Machine type the system runs on.
    pub machine_type: String,
    /// Accelerator chips attached to one machine.
    pub chips_per_machine: u64,
    /// Machines one slice consumes.
    pub machines_per_slice: u64,
}
