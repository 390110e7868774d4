//! Fleet configuration: the static, read-only description of unit types.

/// Unit type records and the validated, ordered fleet.
pub mod unit;

pub use unit::{FleetConfig, UnitType};
