//! Pipeline engine: deploy, decommission, derive capacity, score.

use tracing::info;

use crate::error::FleetError;
use crate::fleet::FleetConfig;

use super::capacity::counts_to_capacity;
use super::decommission::apply_decommissioning;
use super::deploy::DeploymentPolicy;
use super::ledger::Ledger;
use super::score::{ScoreReport, score};

/// Final ledger and its score for one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub policy: &'static str,
    pub ledger: Ledger,
    pub report: ScoreReport,
}

/// Owns the fleet, the policy, and the ledger for a single run.
///
/// Generic over `P: DeploymentPolicy` for static dispatch. [`Engine::run`]
/// consumes the engine because decommissioning may only be applied once
/// per ledger.
pub struct Engine<P: DeploymentPolicy> {
    fleet: FleetConfig,
    policy: P,
    ledger: Ledger,
}

impl<P: DeploymentPolicy> Engine<P> {
    /// Creates an engine with an empty ledger sized to `demand`.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::InvalidDemand` for a negative or non-finite
    /// demand value.
    pub fn new(fleet: FleetConfig, policy: P, demand: &[f64], start_year: i32) -> Result<Self, FleetError> {
        let ledger = Ledger::new(demand, start_year, &fleet)?;
        Ok(Self {
            fleet,
            policy,
            ledger,
        })
    }

    pub fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    /// Runs the deployment pass, then decommissioning, then capacity
    /// accounting, and scores new capacity against demand.
    ///
    /// # Errors
    ///
    /// Propagates policy errors and scoring errors; a run whose ledger
    /// holds no capacity yields `FleetError::ZeroTotalCapacity`.
    pub fn run(mut self) -> Result<RunResult, FleetError> {
        let policy = self.policy.name();
        info!(
            policy,
            horizon = self.ledger.len(),
            units = self.fleet.len(),
            "starting deployment run"
        );

        self.build_ledger()?;
        let demand = self.ledger.demand_column();
        let achieved = self.ledger.new_capacity_column();
        let report = score(&self.ledger, &demand, &achieved, &self.fleet)?;

        info!(
            policy,
            above = report.above_count,
            below = report.below_count,
            equal = report.equal_count,
            "deployment run finished"
        );
        Ok(RunResult {
            policy,
            ledger: self.ledger,
            report,
        })
    }

    /// Runs every ledger-building pass without scoring.
    ///
    /// # Errors
    ///
    /// Propagates policy errors.
    pub fn into_ledger(mut self) -> Result<Ledger, FleetError> {
        self.build_ledger()?;
        Ok(self.ledger)
    }

    fn build_ledger(&mut self) -> Result<(), FleetError> {
        self.policy.deploy(&mut self.ledger, &self.fleet)?;
        apply_decommissioning(&mut self.ledger, &self.fleet)?;
        counts_to_capacity(&mut self.ledger, &self.fleet);
        Ok(())
    }
}
