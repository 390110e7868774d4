use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::error::FleetError;
use crate::fleet::FleetConfig;
use crate::sim::ledger::Ledger;

use super::{DeploymentPolicy, fill_largest_first};

/// Seeded random proposals followed by a greedy top-up.
///
/// At each step unit types are drawn uniformly and deployed one at a time
/// while they fit the remaining demand. The first draw that does not fit
/// ends the random phase and the residual is packed largest-first. The
/// RNG is seeded once per deployment pass from `seed`, so equal seeds give
/// equal ledgers.
#[derive(Debug, Clone, Copy)]
pub struct RandomGreedy {
    pub seed: u64,
}

impl RandomGreedy {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeploymentPolicy for RandomGreedy {
    fn name(&self) -> &'static str {
        "random-greedy"
    }

    fn deploy(&mut self, ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let order = fleet.largest_first();
        for t in 0..ledger.len() {
            let mut remaining = ledger.step(t).demand;
            let mut drawn = 0u32;
            loop {
                let u = rng.random_range(0..fleet.len());
                let power = fleet.unit(u).power_mwe;
                if power > remaining {
                    break;
                }
                ledger.commission(t, u, 1)?;
                remaining -= power;
                drawn += 1;
            }
            let (picks, gap) = fill_largest_first(t, remaining, &order, fleet)?;
            for (u, n) in picks {
                ledger.commission(t, u, n)?;
            }
            debug!(step = t, drawn, gap, "random-greedy step");
        }
        Ok(())
    }
}
