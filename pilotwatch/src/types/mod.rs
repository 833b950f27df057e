//! Core data types for pilot-order monitoring.

mod change;
mod order;
mod vessel;

pub use change::{FieldDelta, VesselChange, VesselDiff};
pub use order::{ORDER_TIME_FORMAT, OrderField, PilotOrder, VesselCategory, VesselType};
pub use vessel::VesselKey;
