//! Reservation configuration validation.
//!
//! Before any slice count is trusted, the fetched reservation's hardware
//! must match the requested system. Validation runs once per top-level
//! link; links synthesized during flattening inherit their parent's
//! verdict and skip it.

use tracing::warn;

use slice_core::{AcceleratorKind, Reservation, SystemCharacteristics};
use slicegrid_inventory::FetchCache;

use crate::error::{CapacityError, CapacityResult};
use crate::matcher::find_matching_resource;

/// Whether the assessment runs against real provider state.
///
/// Passed explicitly rather than read from ambient process state so the
/// validator stays pure and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Live,
    /// No real provider state to check; validation short-circuits to Ok.
    DryRun,
}

/// Check the reservation's hardware against the requested system.
///
/// A reservation with neither payload populated passes through unvalidated;
/// its zero capacity surfaces as `NoCapacity` downstream.
pub fn validate_reservation(
    inventory: &FetchCache<'_>,
    reservation: &Reservation,
    system: &SystemCharacteristics,
    mode: ExecutionMode,
) -> CapacityResult<()> {
    if mode == ExecutionMode::DryRun {
        return Ok(());
    }

    if let Some(specific) = &reservation.specific {
        match system.accelerator_kind {
            AcceleratorKind::Tpu | AcceleratorKind::Cpu => {
                if specific.machine_type != system.machine_type {
                    return Err(mismatch(
                        reservation,
                        format!(
                            "machine type is '{}', requested system requires '{}'",
                            specific.machine_type, system.machine_type
                        ),
                    ));
                }
            }
            AcceleratorKind::Gpu => {
                let has_match = specific
                    .guest_accelerators
                    .iter()
                    .any(|acc| acc.accelerator_type == system.accelerator);
                if !has_match {
                    return Err(mismatch(
                        reservation,
                        format!("no guest accelerator matches '{}'", system.accelerator),
                    ));
                }
            }
        }
    } else if reservation.aggregate.is_some()
        && find_matching_resource(inventory, reservation, system)?.is_none()
    {
        return Err(mismatch(
            reservation,
            format!(
                "no reserved accelerator resource matches '{}'",
                system.accelerator
            ),
        ));
    }

    Ok(())
}

fn mismatch(reservation: &Reservation, detail: String) -> CapacityError {
    warn!(reservation = %reservation.link.path(), %detail, "reservation configuration mismatch");
    CapacityError::ConfigMismatch {
        path: reservation.link.path(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_core::{
        AcceleratorResource, AggregateReservation, CapacityLink, SpecificReservation,
    };
    use slicegrid_inventory::MockInventory;

    fn tpu_system() -> SystemCharacteristics {
        SystemCharacteristics {
            accelerator_kind: AcceleratorKind::Tpu,
            accelerator: "test-accel".to_string(),
            machine_type: "test-machine".to_string(),
            chips_per_machine: 1,
            machines_per_slice: 1,
        }
    }

    fn specific_reservation(machine_type: &str) -> Reservation {
        Reservation {
            link: CapacityLink::reservation("p", "r", "z"),
            status: "READY".to_string(),
            specific: Some(SpecificReservation {
                count: 10,
                in_use_count: 2,
                machine_type: machine_type.to_string(),
                guest_accelerators: Vec::new(),
            }),
            aggregate: None,
        }
    }

    #[test]
    fn matching_machine_type_passes() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let reservation = specific_reservation("test-machine");

        assert!(
            validate_reservation(&cache, &reservation, &tpu_system(), ExecutionMode::Live)
                .is_ok()
        );
    }

    #[test]
    fn wrong_machine_type_is_a_mismatch() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let reservation = specific_reservation("wrong-machine");

        let err = validate_reservation(&cache, &reservation, &tpu_system(), ExecutionMode::Live)
            .unwrap_err();

        match err {
            CapacityError::ConfigMismatch { detail, .. } => {
                assert!(detail.contains("wrong-machine"));
                assert!(detail.contains("test-machine"));
            }
            other => panic!("expected ConfigMismatch, got {other:?}"),
        }
    }

    #[test]
    fn cpu_system_checks_machine_type_too() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let system = SystemCharacteristics {
            accelerator_kind: AcceleratorKind::Cpu,
            accelerator: "N/A".to_string(),
            machine_type: "n2-standard-32".to_string(),
            chips_per_machine: 32,
            machines_per_slice: 1,
        };
        let reservation = specific_reservation("n2-standard-64");

        let err = validate_reservation(&cache, &reservation, &system, ExecutionMode::Live)
            .unwrap_err();
        assert!(matches!(err, CapacityError::ConfigMismatch { .. }));
    }

    #[test]
    fn gpu_requires_matching_guest_accelerator() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let system = SystemCharacteristics {
            accelerator_kind: AcceleratorKind::Gpu,
            accelerator: "nvidia-test".to_string(),
            machine_type: "g2-standard-12".to_string(),
            chips_per_machine: 1,
            machines_per_slice: 1,
        };

        let mut reservation = specific_reservation("g2-standard-12");
        reservation.specific.as_mut().unwrap().guest_accelerators =
            vec![AcceleratorResource {
                accelerator_type: "nvidia-wrong".to_string(),
                accelerator_count: 1,
            }];
        let err = validate_reservation(&cache, &reservation, &system, ExecutionMode::Live)
            .unwrap_err();
        assert!(matches!(err, CapacityError::ConfigMismatch { .. }));

        reservation.specific.as_mut().unwrap().guest_accelerators =
            vec![AcceleratorResource {
                accelerator_type: "nvidia-test".to_string(),
                accelerator_count: 1,
            }];
        assert!(
            validate_reservation(&cache, &reservation, &system, ExecutionMode::Live).is_ok()
        );
    }

    #[test]
    fn gpu_machine_type_is_not_compared() {
        // GPU validation is accelerator-identifier equality only.
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let system = SystemCharacteristics {
            accelerator_kind: AcceleratorKind::Gpu,
            accelerator: "nvidia-test".to_string(),
            machine_type: "g2-standard-12".to_string(),
            chips_per_machine: 1,
            machines_per_slice: 1,
        };

        let mut reservation = specific_reservation("entirely-different-machine");
        reservation.specific.as_mut().unwrap().guest_accelerators =
            vec![AcceleratorResource {
                accelerator_type: "nvidia-test".to_string(),
                accelerator_count: 1,
            }];

        assert!(
            validate_reservation(&cache, &reservation, &system, ExecutionMode::Live).is_ok()
        );
    }

    #[test]
    fn aggregate_without_match_is_a_mismatch() {
        let mock = MockInventory::new().with_project_number("12345");
        let cache = FetchCache::new(&mock);
        let reservation = Reservation {
            link: CapacityLink::reservation("p", "r", "z"),
            status: "READY".to_string(),
            specific: None,
            aggregate: Some(AggregateReservation {
                reserved_resources: vec![AcceleratorResource {
                    accelerator_type: "wrong-type".to_string(),
                    accelerator_count: 100,
                }],
                in_use_resources: Vec::new(),
            }),
        };

        let err = validate_reservation(&cache, &reservation, &tpu_system(), ExecutionMode::Live)
            .unwrap_err();
        assert!(matches!(err, CapacityError::ConfigMismatch { .. }));
    }

    #[test]
    fn dry_run_short_circuits() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let reservation = specific_reservation("wrong-machine");

        assert!(
            validate_reservation(&cache, &reservation, &tpu_system(), ExecutionMode::DryRun)
                .is_ok()
        );
    }

    #[test]
    fn unpopulated_reservation_passes_through() {
        let mock = MockInventory::new();
        let cache = FetchCache::new(&mock);
        let reservation = Reservation {
            link: CapacityLink::reservation("p", "r", "z"),
            status: "CREATING".to_string(),
            specific: None,
            aggregate: None,
        };

        assert!(
            validate_reservation(&cache, &reservation, &tpu_system(), ExecutionMode::Live)
                .is_ok()
        );
    }
}
