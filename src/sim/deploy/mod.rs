//! Deployment policies: per-step commissioning decisions against demand.

/// Largest-first packing against demand.
pub mod greedy;
/// Fixed schedules with greedy or linear residual fill.
pub mod predetermined;
/// Seeded random draws topped up greedily.
pub mod random;

pub use greedy::Greedy;
pub use predetermined::Predetermined;
pub use random::RandomGreedy;

use crate::error::FleetError;
use crate::fleet::FleetConfig;

use super::ledger::Ledger;

/// Contract shared by every deployment strategy.
///
/// A policy runs once over a freshly created ledger and only ever adds
/// commissions; it never reads or writes decommissioning state.
pub trait DeploymentPolicy {
    /// Short policy name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Fills `count` for every step and unit type of `ledger`.
    ///
    /// # Errors
    ///
    /// Returns a `FleetError` if the ledger and fleet disagree.
    fn deploy(&mut self, ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError>;
}

/// Runtime-selected policy, for callers that pick a strategy from
/// configuration.
#[derive(Debug, Clone)]
pub enum Policy {
    Greedy(Greedy),
    Predetermined(Predetermined),
    RandomGreedy(RandomGreedy),
}

impl DeploymentPolicy for Policy {
    fn name(&self) -> &'static str {
        match self {
            Policy::Greedy(p) => p.name(),
            Policy::Predetermined(p) => p.name(),
            Policy::RandomGreedy(p) => p.name(),
        }
    }

    fn deploy(&mut self, ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError> {
        match self {
            Policy::Greedy(p) => p.deploy(ledger, fleet),
            Policy::Predetermined(p) => p.deploy(ledger, fleet),
            Policy::RandomGreedy(p) => p.deploy(ledger, fleet),
        }
    }
}

/// Converts a whole, non-negative unit count to `u32`.
///
/// # Errors
///
/// Returns `FleetError::CountOverflow` when `n` exceeds `u32::MAX`.
pub(crate) fn whole_units(step: usize, unit: usize, n: f64) -> Result<u32, FleetError> {
    if n <= f64::from(u32::MAX) {
        Ok(n as u32)
    } else {
        Err(FleetError::CountOverflow {
            unit,
            step,
            requested: n,
        })
    }
}

/// Largest-first whole-unit packing of `remaining` MWe over `order` at
/// time step `step`.
///
/// Walks the candidate types once. Each type that fits receives
/// `floor(remaining / power)` units and the deployed capacity is
/// subtracted before the next type is considered. Returns the counts as
/// `(unit index, n)` pairs (zero counts omitted) and the unfilled
/// remainder, which is always `>= 0`.
///
/// # Errors
///
/// Returns `FleetError::CountOverflow` if a type would need more than
/// `u32::MAX` units.
pub fn fill_largest_first(
    step: usize,
    mut remaining: f64,
    order: &[usize],
    fleet: &FleetConfig,
) -> Result<(Vec<(usize, u32)>, f64), FleetError> {
    let mut picks = Vec::new();
    for &u in order {
        let power = fleet.unit(u).power_mwe;
        if power > remaining {
            continue;
        }
        let n = whole_units(step, u, (remaining / power).floor())?;
        remaining = (remaining - f64::from(n) * power).max(0.0);
        if n > 0 {
            picks.push((u, n));
        }
    }
    Ok((picks, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::UnitType;

    fn fleet() -> FleetConfig {
        FleetConfig::new(vec![
            UnitType::new("Big", 80.0, 1.0, 6),
            UnitType::new("Medium", 20.0, 1.0, 4),
            UnitType::new("Small", 5.0, 1.0, 2),
        ])
        .expect("fleet should be valid")
    }

    #[test]
    fn fill_is_myopic_largest_first() {
        let f = fleet();
        let (picks, rest) = fill_largest_first(0, 81.0, &f.largest_first(), &f).expect("fits");
        assert_eq!(picks, vec![(0, 1)]);
        assert!((rest - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fill_cascades_through_sizes() {
        let f = fleet();
        let (picks, rest) = fill_largest_first(0, 79.0, &f.largest_first(), &f).expect("fits");
        assert_eq!(picks, vec![(1, 3), (2, 3)]);
        assert!((rest - 4.0).abs() < 1e-9);
    }

    #[test]
    fn fill_zero_deploys_nothing() {
        let f = fleet();
        let (picks, rest) = fill_largest_first(0, 0.0, &f.largest_first(), &f).expect("fits");
        assert!(picks.is_empty());
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn fill_beyond_count_limit_is_an_error() {
        let f = FleetConfig::new(vec![UnitType::new("Tiny", 1.0, 1.0, 3)]).expect("valid");
        let err = fill_largest_first(4, 5e9, &f.largest_first(), &f);
        assert!(matches!(
            err,
            Err(FleetError::CountOverflow { unit: 0, step: 4, .. })
        ));
    }

    #[test]
    fn fill_at_count_limit_is_exact() {
        let f = FleetConfig::new(vec![UnitType::new("Tiny", 1.0, 1.0, 3)]).expect("valid");
        let (picks, rest) =
            fill_largest_first(0, f64::from(u32::MAX), &f.largest_first(), &f).expect("fits");
        assert_eq!(picks, vec![(0, u32::MAX)]);
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn policy_enum_reports_inner_name() {
        assert_eq!(Policy::Greedy(Greedy).name(), "greedy");
        assert_eq!(Policy::RandomGreedy(RandomGreedy::new(7)).name(), "random-greedy");
    }
}
