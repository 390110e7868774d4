//! Core ledger record types: one typed row per time step.

use std::fmt;

/// Per-unit-type state at one time step.
///
/// `count` is mutated only by deployment and decommissioning passes. The
/// capacity fields are derived by [`counts_to_capacity`] and never edited
/// by hand.
///
/// [`counts_to_capacity`]: super::capacity::counts_to_capacity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitState {
    /// Units commissioned at this step, replacements included.
    pub count: u32,
    /// Units retired at this step.
    pub decommissioned: u32,
    /// `count * power * capacity_factor` (MWe).
    pub capacity: f64,
    /// Capacity from units that are new to the fleet, i.e. excluding
    /// like-for-like replacements (MWe).
    pub new_capacity: f64,
}

/// Complete record of one ledger time step.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStep {
    /// Zero-based step index.
    pub step: usize,
    /// Calendar year of this step.
    pub year: i32,
    /// Externally supplied capacity target (MWe, >= 0).
    pub demand: f64,
    /// Per-unit state, in fleet declaration order.
    pub units: Vec<UnitState>,
    /// Sum of `units[*].capacity`.
    pub total_capacity: f64,
    /// Sum of `units[*].new_capacity`.
    pub new_total_capacity: f64,
}

impl LedgerStep {
    pub(crate) fn empty(step: usize, year: i32, demand: f64, unit_count: usize) -> Self {
        Self {
            step,
            year,
            demand,
            units: vec![UnitState::default(); unit_count],
            total_capacity: 0.0,
            new_total_capacity: 0.0,
        }
    }

    /// Total units commissioned at this step across all types.
    pub fn total_count(&self) -> u32 {
        self.units.iter().map(|u| u.count).sum()
    }
}

impl fmt::Display for LedgerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = self.units.iter().map(|u| u.count.to_string()).collect();
        let decoms: Vec<String> = self
            .units
            .iter()
            .map(|u| u.decommissioned.to_string())
            .collect();
        write!(
            f,
            "t={:>3} ({}) | demand={:>9.2} MWe  new={:>9.2} MWe  total={:>9.2} MWe | \
             num=[{}] decom=[{}]",
            self.step,
            self.year,
            self.demand,
            self.new_total_capacity,
            self.total_capacity,
            counts.join(", "),
            decoms.join(", "),
        )
    }
}
