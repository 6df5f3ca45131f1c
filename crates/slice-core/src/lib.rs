pub mod link;
pub mod reservation;
pub mod system;

pub use link::CapacityLink;
pub use reservation::*;
pub use system::{AcceleratorKind, SystemCharacteristics};
