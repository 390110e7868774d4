//! Time-indexed capacity ledger owned by a single pipeline run.

use crate::error::FleetError;
use crate::fleet::FleetConfig;

use super::types::{LedgerStep, UnitState};

/// Ordered, gap-free sequence of ledger rows covering the modeled horizon.
///
/// Created with all counts at zero; mutated in place by exactly one
/// deployment pass and one decommissioning pass, then read by scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    steps: Vec<LedgerStep>,
}

impl Ledger {
    /// Creates an empty ledger for `demand.len()` steps starting at
    /// `start_year`.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::InvalidDemand` if any demand value is negative
    /// or non-finite.
    pub fn new(demand: &[f64], start_year: i32, fleet: &FleetConfig) -> Result<Self, FleetError> {
        let mut steps = Vec::with_capacity(demand.len());
        for (t, &value) in demand.iter().enumerate() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FleetError::InvalidDemand { step: t, value });
            }
            steps.push(LedgerStep::empty(t, start_year + t as i32, value, fleet.len()));
        }
        Ok(Self { steps })
    }

    /// Number of time steps in the horizon.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[LedgerStep] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [LedgerStep] {
        &mut self.steps
    }

    pub fn step(&self, t: usize) -> &LedgerStep {
        &self.steps[t]
    }

    /// State of unit type `unit` at step `t`.
    pub fn unit(&self, t: usize, unit: usize) -> &UnitState {
        &self.steps[t].units[unit]
    }

    /// Adds `n` commissions of unit type `unit` at step `t`.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::CountOverflow` if the step's count would not
    /// fit in a `u32`; the ledger is left unchanged.
    pub fn commission(&mut self, t: usize, unit: usize, n: u32) -> Result<(), FleetError> {
        let state = &mut self.steps[t].units[unit];
        match state.count.checked_add(n) {
            Some(count) => {
                state.count = count;
                Ok(())
            }
            None => Err(FleetError::CountOverflow {
                unit,
                step: t,
                requested: f64::from(state.count) + f64::from(n),
            }),
        }
    }

    /// Records `n` retirements of unit type `unit` at step `t` together
    /// with their like-for-like replacements.
    pub(crate) fn replace(&mut self, t: usize, unit: usize, n: u32) -> Result<(), FleetError> {
        let state = &mut self.steps[t].units[unit];
        match (state.count.checked_add(n), state.decommissioned.checked_add(n)) {
            (Some(count), Some(decommissioned)) => {
                state.count = count;
                state.decommissioned = decommissioned;
                Ok(())
            }
            _ => Err(FleetError::CountOverflow {
                unit,
                step: t,
                requested: f64::from(state.count) + f64::from(n),
            }),
        }
    }

    pub fn demand_column(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.demand).collect()
    }

    /// Capacity added per step by units new to the fleet.
    pub fn new_capacity_column(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.new_total_capacity).collect()
    }

    pub fn total_capacity_column(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.total_capacity).collect()
    }

    /// Per-step commission counts for one unit type.
    pub fn count_column(&self, unit: usize) -> Vec<u32> {
        self.steps.iter().map(|s| s.units[unit].count).collect()
    }

    /// Per-step decommission counts for one unit type.
    pub fn decommissioned_column(&self, unit: usize) -> Vec<u32> {
        self.steps
            .iter()
            .map(|s| s.units[unit].decommissioned)
            .collect()
    }

    /// Nameplate capacity commissioned at step `t`, ignoring capacity
    /// factors. This is the quantity deployment policies pack against
    /// demand.
    pub fn nameplate_at(&self, t: usize, fleet: &FleetConfig) -> f64 {
        self.steps[t]
            .units
            .iter()
            .zip(fleet.units())
            .map(|(state, unit)| f64::from(state.count) * unit.power_mwe)
            .sum()
    }
}
