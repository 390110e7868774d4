use tracing::debug;

use crate::error::FleetError;
use crate::fleet::FleetConfig;
use crate::sim::ledger::Ledger;

use super::{DeploymentPolicy, fill_largest_first};

/// Largest-unit-first bin packing against each step's demand.
///
/// Remaining demand is reduced cumulatively within a step: after a type
/// is deployed its capacity is subtracted before smaller types are tried.
/// Deployed nameplate capacity never exceeds demand; any gap smaller than
/// the smallest unit is left unfilled.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl DeploymentPolicy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn deploy(&mut self, ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError> {
        let order = fleet.largest_first();
        for t in 0..ledger.len() {
            let demand = ledger.step(t).demand;
            let (picks, gap) = fill_largest_first(t, demand, &order, fleet)?;
            for (u, n) in picks {
                ledger.commission(t, u, n)?;
            }
            debug!(step = t, demand, gap, "greedy step");
        }
        Ok(())
    }
}
