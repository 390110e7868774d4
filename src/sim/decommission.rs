//! Direct-replacement decommissioning.

use tracing::debug;

use crate::error::FleetError;
use crate::fleet::FleetConfig;

use super::ledger::Ledger;

/// Retires every unit `lifetime` steps after it was commissioned and
/// immediately recommissions the same number of the same type.
///
/// Steps are walked in ascending order, so replacements commissioned at
/// step `t` are themselves retired at `t + lifetime`. Units whose
/// retirement falls past the horizon never leave service inside the
/// modeled window.
///
/// This reads the full commissioning history and is not idempotent: call
/// it exactly once, after deployment has finished for the whole horizon.
///
/// # Errors
///
/// Returns `FleetError::CountOverflow` if a replacement pushes a step's
/// count past `u32::MAX`.
pub fn apply_decommissioning(ledger: &mut Ledger, fleet: &FleetConfig) -> Result<(), FleetError> {
    let horizon = ledger.len();
    for (u, unit) in fleet.units().iter().enumerate() {
        for t in unit.lifetime..horizon {
            let retiring = ledger.unit(t - unit.lifetime, u).count;
            if retiring == 0 {
                continue;
            }
            ledger.replace(t, u, retiring)?;
            debug!(unit = %unit.name, step = t, retiring, "direct replacement");
        }
    }
    Ok(())
}
