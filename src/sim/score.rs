//! Post-hoc scoring of a deployment against its target curve.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::FleetError;
use crate::fleet::FleetConfig;

use super::ledger::Ledger;

/// Absolute difference (MWe) below which a step counts as meeting demand.
pub const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Percent difference of one step relative to demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentDifference {
    Defined(f64),
    /// Demand was zero, so the ratio has no value.
    Undefined,
}

impl PercentDifference {
    fn of(difference: f64, demand: f64) -> Self {
        if demand == 0.0 {
            Self::Undefined
        } else {
            Self::Defined(difference / demand * 100.0)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for PercentDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.2}%"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Comparison of achieved capacity against demand at one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepScore {
    pub step: usize,
    pub demand: f64,
    pub achieved: f64,
    /// `achieved - demand`.
    pub difference: f64,
    pub percent: PercentDifference,
}

/// Share of total horizon capacity provided by one unit type.
#[derive(Debug, Clone, Serialize)]
pub struct UnitShare {
    pub name: String,
    pub percent: f64,
}

/// Aggregate metrics scoring a deployment policy against its target.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub steps: Vec<StepScore>,
    /// Steps where achieved capacity exceeds demand.
    pub above_count: usize,
    /// Steps where achieved capacity falls short of demand.
    pub below_count: usize,
    /// Steps where achieved capacity matches demand.
    pub equal_count: usize,
    pub above_percentage: f64,
    pub below_percentage: f64,
    pub equal_percentage: f64,
    /// Sum of positive differences (MWe).
    pub total_over_supply: f64,
    /// Sum of negative differences (MWe, <= 0).
    pub total_under_supply: f64,
    /// Per-unit share of total capacity, in fleet order.
    pub shares: Vec<UnitShare>,
}

impl ScoreReport {
    /// Steps whose percent difference is undefined (zero demand).
    pub fn undefined_steps(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter(|s| s.percent == PercentDifference::Undefined)
            .map(|s| s.step)
            .collect()
    }

    /// Share of the named unit type, if it is part of the fleet.
    pub fn share_of(&self, name: &str) -> Option<f64> {
        self.shares.iter().find(|s| s.name == name).map(|s| s.percent)
    }
}

/// Scores `achieved` against `demand` over the ledger horizon.
///
/// Per-unit shares are computed from the ledger's `capacity` columns as
/// `1 - (total_sum - unit_sum) / total_sum`, expressed in percent.
///
/// # Errors
///
/// Returns `FleetError::HorizonMismatch` if either column length differs
/// from the ledger, and `FleetError::ZeroTotalCapacity` if the ledger
/// holds no capacity at all, in which case no report is produced.
pub fn score(
    ledger: &Ledger,
    demand: &[f64],
    achieved: &[f64],
    fleet: &FleetConfig,
) -> Result<ScoreReport, FleetError> {
    for (what, column) in [("demand column", demand), ("achieved column", achieved)] {
        if column.len() != ledger.len() {
            return Err(FleetError::HorizonMismatch {
                what,
                expected: ledger.len(),
                actual: column.len(),
            });
        }
    }

    let steps: Vec<StepScore> = demand
        .iter()
        .zip(achieved)
        .enumerate()
        .map(|(t, (&d, &a))| {
            let difference = a - d;
            StepScore {
                step: t,
                demand: d,
                achieved: a,
                difference,
                percent: PercentDifference::of(difference, d),
            }
        })
        .collect();

    let mut above_count = 0_usize;
    let mut below_count = 0_usize;
    let mut total_over_supply = 0.0_f64;
    let mut total_under_supply = 0.0_f64;
    for s in &steps {
        if s.difference > EQUALITY_TOLERANCE {
            above_count += 1;
            total_over_supply += s.difference;
        } else if s.difference < -EQUALITY_TOLERANCE {
            below_count += 1;
            total_under_supply += s.difference;
        }
        if s.percent == PercentDifference::Undefined {
            warn!(step = s.step, "zero demand: percent difference undefined");
        }
    }
    let equal_count = steps.len() - above_count - below_count;

    let total_sum: f64 = ledger.steps().iter().map(|s| s.total_capacity).sum();
    if total_sum == 0.0 {
        return Err(FleetError::ZeroTotalCapacity);
    }
    let shares = fleet
        .units()
        .iter()
        .enumerate()
        .map(|(u, unit)| {
            let unit_sum: f64 = ledger.steps().iter().map(|s| s.units[u].capacity).sum();
            UnitShare {
                name: unit.name.clone(),
                percent: (1.0 - (total_sum - unit_sum) / total_sum) * 100.0,
            }
        })
        .collect();

    let n = steps.len().max(1) as f64;
    Ok(ScoreReport {
        above_percentage: above_count as f64 / n * 100.0,
        below_percentage: below_count as f64 / n * 100.0,
        equal_percentage: equal_count as f64 / n * 100.0,
        steps,
        above_count,
        below_count,
        equal_count,
        total_over_supply,
        total_under_supply,
        shares,
    })
}

/// Like [`score`], but treats any undefined percent difference as a
/// failure of the whole report.
///
/// # Errors
///
/// Everything [`score`] returns, plus
/// `FleetError::UndefinedPercentDifference` for the first zero-demand step.
pub fn score_strict(
    ledger: &Ledger,
    demand: &[f64],
    achieved: &[f64],
    fleet: &FleetConfig,
) -> Result<ScoreReport, FleetError> {
    let report = score(ledger, demand, achieved, fleet)?;
    match report.undefined_steps().first() {
        Some(&step) => Err(FleetError::UndefinedPercentDifference { step }),
        None => Ok(report),
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Score Report ---")?;
        writeln!(
            f,
            "Above demand:          {} steps ({:.1}%)",
            self.above_count, self.above_percentage
        )?;
        writeln!(
            f,
            "Below demand:          {} steps ({:.1}%)",
            self.below_count, self.below_percentage
        )?;
        writeln!(
            f,
            "Equal to demand:       {} steps ({:.1}%)",
            self.equal_count, self.equal_percentage
        )?;
        writeln!(f, "Total over-supply:     {:.2} MWe", self.total_over_supply)?;
        writeln!(f, "Total under-supply:    {:.2} MWe", self.total_under_supply)?;
        let undefined = self.undefined_steps();
        if !undefined.is_empty() {
            writeln!(f, "Undefined % at steps:  {undefined:?}")?;
        }
        write!(f, "Capacity share:")?;
        for share in &self.shares {
            write!(f, "\n  {:<20} {:>6.2}%", share.name, share.percent)?;
        }
        Ok(())
    }
}
