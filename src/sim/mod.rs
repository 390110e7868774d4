/// Derived per-unit and total capacity.
pub mod capacity;
/// End-of-life retirement and replacement.
pub mod decommission;
/// Deployment policies.
pub mod deploy;
/// The deploy, decommission, capacity, and score pipeline.
pub mod engine;
/// Per-step unit counts for every unit type.
pub mod ledger;
/// Scoring of achieved capacity against demand.
pub mod score;
/// Ledger row and per-unit state records.
pub mod types;
