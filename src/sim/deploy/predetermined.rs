use tracing::debug;

use crate::error::FleetError;
use crate::fleet::FleetConfig;
use crate::sim::ledger::Ledger;

use super::{DeploymentPolicy, fill_largest_first, whole_units};

/// Fixed per-step schedules for distributed types, with the remaining
/// types covering whatever demand the schedules leave open.
///
/// Distributed types always commission exactly their scheduled count
/// (zero past the end of the schedule), even when that overshoots demand.
/// The residual `max(demand - scheduled capacity, 0)` is then covered by
/// the undistributed types:
///
/// - `greedy_fallback = true`: largest-first packing, as [`Greedy`] does.
/// - `greedy_fallback = false` ("linear"): every undistributed type gets
///   the same count `ceil(residual / Σ undistributed power)`, i.e. whole
///   bundles of one unit per type until the residual is covered.
///
/// With no undistributed types both modes commission the schedules only.
///
/// [`Greedy`]: super::Greedy
#[derive(Debug, Clone, Copy)]
pub struct Predetermined {
    pub greedy_fallback: bool,
}

impl Predetermined {
    pub fn new(greedy_fallback: bool) -> Self {
        Self { greedy_fallback }
    }

    fn linear_fill(
        step: usize,
        residual: f64,
        undistributed: &[usize],
        fleet: &FleetConfig,
    ) -> Result<Vec<(usize, u32)>, FleetError> {
        let bundle: f64 = undistributed.iter().map(|&u| fleet.unit(u).power_mwe).sum();
        if residual <= 0.0 || bundle <= 0.0 {
            return Ok(Vec::new());
        }
        let bundles = (residual / bundle).ceil();
        undistributed
            .iter()
            .map(|&u| whole_units(step, u, bundles).map(|n| (u, n)))
            .collect()
    }
}

impl Default for Predetermined {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DeploymentPolicy for Predetermined {
    fn name(&self) -> &'static str {
        if self.greedy_fallback {
            "predetermined-greedy"
        } else {
            "predetermined-linear"
        }
    }

    fn deploy(&mut self, ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError> {
        let undistributed = fleet.undistributed_largest_first();
        for t in 0..ledger.len() {
            let mut scheduled = 0.0;
            for (u, unit) in fleet.units().iter().enumerate() {
                if let Some(n) = unit.scheduled_at(t) {
                    ledger.commission(t, u, n)?;
                    scheduled += f64::from(n) * unit.power_mwe;
                }
            }

            let residual = (ledger.step(t).demand - scheduled).max(0.0);
            let picks = if self.greedy_fallback {
                fill_largest_first(t, residual, &undistributed, fleet)?.0
            } else {
                Self::linear_fill(t, residual, &undistributed, fleet)?
            };
            for (u, n) in picks {
                ledger.commission(t, u, n)?;
            }
            debug!(step = t, scheduled, residual, "predetermined step");
        }
        Ok(())
    }
}
