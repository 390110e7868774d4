//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use fleet_deploy::fleet::{FleetConfig, UnitType};
use fleet_deploy::sim::deploy::DeploymentPolicy;
use fleet_deploy::sim::engine::{Engine, RunResult};

/// Demand curve of the reference three-unit scenario (MWe).
pub const DEMAND: [f64; 9] = [20.0, 79.0, 80.0, 81.0, 220.0, 640.0, 693.0, 950.0, 700.0];

/// First calendar year of the reference scenario.
pub const START_YEAR: i32 = 2016;

/// Float comparison tolerance for capacity columns.
pub const TOL: f64 = 1e-9;

/// Reference unit types: Big 80 MWe / 6 steps, Medium 20 MWe / 4 steps,
/// Small 5 MWe / 2 steps, all at capacity factor 1.
pub fn reference_units() -> Vec<UnitType> {
    vec![
        UnitType::new("ReactorBig", 80.0, 1.0, 6),
        UnitType::new("ReactorMedium", 20.0, 1.0, 4),
        UnitType::new("ReactorSmall", 5.0, 1.0, 2),
    ]
}

pub fn reference_fleet() -> FleetConfig {
    FleetConfig::new(reference_units()).expect("reference fleet is valid")
}

/// Reference fleet with a fixed schedule on ReactorBig.
pub fn scheduled_fleet(distribution: Vec<u32>) -> FleetConfig {
    let mut units = reference_units();
    units[0] = units[0].clone().with_distribution(distribution);
    FleetConfig::new(units).expect("scheduled fleet is valid")
}

/// Runs `policy` over the reference demand.
pub fn run_reference<P: DeploymentPolicy>(fleet: FleetConfig, policy: P) -> RunResult {
    Engine::new(fleet, policy, &DEMAND, START_YEAR)
        .and_then(Engine::run)
        .expect("reference run succeeds")
}

pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (t, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < TOL, "step {t}: got {a}, expected {e}");
    }
}
