//! Enter, exit, and cumulative unit counts and electricity output derived
//! from a simulator trace.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use serde::Serialize;
use tracing::warn;

use super::trace::{EntityEvent, SimulationTrace};

/// Calendar year of simulation time step zero.
pub const DEFAULT_START_YEAR: i32 = 1965;

/// Time steps per calendar year (monthly steps).
pub const STEPS_PER_YEAR: f64 = 12.0;

/// Converts a monthly time step to a fractional calendar year, rounded to
/// two decimals.
pub fn time_to_year(step: usize, start_year: i32) -> f64 {
    let year = step as f64 / STEPS_PER_YEAR + f64::from(start_year);
    (year * 100.0).round() / 100.0
}

/// Enter (positive), exit (negative), and running total counts per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowColumn {
    pub enter: Vec<f64>,
    pub exit: Vec<f64>,
    pub total: Vec<f64>,
}

impl FlowColumn {
    fn zeros(len: usize) -> Self {
        Self {
            enter: vec![0.0; len],
            exit: vec![0.0; len],
            total: vec![0.0; len],
        }
    }

    fn accumulate(&mut self) {
        let mut running = 0.0;
        for t in 0..self.total.len() {
            running += self.enter[t] + self.exit[t];
            self.total[t] = running;
        }
    }

    fn add(&mut self, other: &FlowColumn) {
        for t in 0..self.total.len() {
            self.enter[t] += other.enter[t];
            self.exit[t] += other.exit[t];
            self.total[t] += other.total[t];
        }
    }
}

/// Deployment flows per tracked prototype, plus the untracked (legacy)
/// fleet and the tracked (advanced) fleet as aggregate groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionTable {
    pub time: Vec<usize>,
    pub year: Vec<f64>,
    pub prototypes: BTreeMap<String, FlowColumn>,
    /// Every prototype not in the tracked list.
    pub legacy: FlowColumn,
    /// Sum over the tracked prototypes.
    pub advanced: FlowColumn,
}

impl TransitionTable {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn column(&self, prototype: &str) -> Option<&FlowColumn> {
        self.prototypes.get(prototype)
    }

    /// Cumulative deployed count of one tracked prototype, scaled by
    /// `power_mwe`, for use as a demand or achieved column in scoring.
    pub fn as_capacity(&self, prototype: &str, power_mwe: f64) -> Option<Vec<f64>> {
        self.column(prototype)
            .map(|c| c.total.iter().map(|n| n * power_mwe).collect())
    }
}

/// Builds enter/exit/total columns for `tracked` prototypes over
/// `horizon` time steps.
///
/// Steps with no events are zero-filled; tracked prototypes that never
/// appear get all-zero columns. Events at or past the horizon are skipped
/// with a warning.
pub fn prototype_totals(
    trace: &SimulationTrace,
    tracked: &[&str],
    horizon: usize,
    start_year: i32,
) -> TransitionTable {
    let tracked_set: HashSet<&str> = tracked.iter().copied().collect();
    let mut prototypes: BTreeMap<String, FlowColumn> = tracked
        .iter()
        .map(|name| ((*name).to_string(), FlowColumn::zeros(horizon)))
        .collect();
    let mut legacy = FlowColumn::zeros(horizon);

    let mut apply = |events: &[EntityEvent], sign: f64, exit: bool| {
        for e in events {
            if e.time >= horizon {
                warn!(time = e.time, horizon, prototype = %e.prototype, "event past horizon skipped");
                continue;
            }
            let column = if tracked_set.contains(e.prototype.as_str()) {
                prototypes.get_mut(&e.prototype)
            } else {
                Some(&mut legacy)
            };
            if let Some(column) = column {
                let value = sign * f64::from(e.count);
                if exit {
                    column.exit[e.time] += value;
                } else {
                    column.enter[e.time] += value;
                }
            }
        }
    };
    apply(&trace.commissions, 1.0, false);
    apply(&trace.decommissions, -1.0, true);

    legacy.accumulate();
    let mut advanced = FlowColumn::zeros(horizon);
    for column in prototypes.values_mut() {
        column.accumulate();
        advanced.add(column);
    }

    TransitionTable {
        time: (0..horizon).collect(),
        year: (0..horizon).map(|t| time_to_year(t, start_year)).collect(),
        prototypes,
        legacy,
        advanced,
    }
}

/// Electricity output per calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergySeries {
    pub years: Vec<i32>,
    /// Energy in GWe-yr.
    pub energy: Vec<f64>,
}

fn energy_by_year<F>(trace: &SimulationTrace, keep: F) -> BTreeMap<i32, f64>
where
    F: Fn(&str) -> bool,
{
    let mut by_year = BTreeMap::new();
    for r in trace.energy.iter().filter(|r| keep(&r.prototype)) {
        *by_year.entry(r.year).or_insert(0.0) += r.energy;
    }
    by_year
}

fn to_gwe(by_year: BTreeMap<i32, f64>, years: Option<Range<i32>>) -> EnergySeries {
    let years: Vec<i32> = match years {
        Some(range) => range.collect(),
        None => by_year.keys().copied().collect(),
    };
    let energy = years
        .iter()
        .map(|y| by_year.get(y).copied().unwrap_or(0.0) / 1000.0)
        .collect();
    EnergySeries { years, energy }
}

/// Total electricity per year present in the trace (GWe-yr).
pub fn annual_electricity(trace: &SimulationTrace) -> EnergySeries {
    to_gwe(energy_by_year(trace, |_| true), None)
}

/// Electricity output per month, keyed by fractional calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub months: Vec<usize>,
    /// `month / 12 + start_year`, unrounded.
    pub years: Vec<f64>,
    /// Energy in GWe-yr.
    pub energy: Vec<f64>,
}

/// Total electricity per month present in the trace (GWe-yr).
pub fn monthly_electricity(trace: &SimulationTrace, start_year: i32) -> MonthlySeries {
    let mut by_month: BTreeMap<usize, f64> = BTreeMap::new();
    for r in &trace.monthly_energy {
        *by_month.entry(r.month).or_insert(0.0) += r.energy;
    }
    let months: Vec<usize> = by_month.keys().copied().collect();
    let years = months
        .iter()
        .map(|&m| m as f64 / STEPS_PER_YEAR + f64::from(start_year))
        .collect();
    let energy = by_month.values().map(|e| e / 1000.0).collect();
    MonthlySeries {
        months,
        years,
        energy,
    }
}

/// Electricity from one prototype, zero-filled over `years`.
pub fn prototype_energy(trace: &SimulationTrace, prototype: &str, years: Range<i32>) -> EnergySeries {
    to_gwe(energy_by_year(trace, |p| p == prototype), Some(years))
}

/// Electricity from every prototype except `advanced`, zero-filled over
/// `years`.
pub fn legacy_energy(trace: &SimulationTrace, advanced: &str, years: Range<i32>) -> EnergySeries {
    to_gwe(energy_by_year(trace, |p| p != advanced), Some(years))
}
