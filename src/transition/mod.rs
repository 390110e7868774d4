//! Transition analytics over an externally supplied simulator trace.

/// Separative work helpers for enrichment demand.
pub mod enrichment;
/// Commodity mass traded per time step.
pub mod flows;
/// Deployment tables and electricity series.
pub mod metrics;
/// Trace records and CSV loading.
pub mod trace;

pub use flows::{CommodityFlow, commodity_mass_traded, commodity_to_legacy, commodity_to_prototype};
pub use metrics::{
    EnergySeries, FlowColumn, MonthlySeries, TransitionTable, annual_electricity, legacy_energy,
    monthly_electricity, prototype_energy, prototype_totals, time_to_year,
};
pub use trace::{EnergyRecord, EntityEvent, MonthlyEnergyRecord, SimulationTrace, TransactionRecord};
