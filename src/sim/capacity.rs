//! Derivation of capacity columns from unit counts.

use crate::fleet::FleetConfig;

use super::ledger::Ledger;

/// Recomputes every derived capacity field from counts and the static
/// fleet configuration.
///
/// For each step and unit type:
/// - `capacity = count * power * capacity_factor`
/// - `new_capacity = (count - decommissioned) * power * capacity_factor`
///
/// Totals are summed across types. Every field is overwritten, so running
/// this again after counts change (or without any change) is safe.
pub fn counts_to_capacity(ledger: &mut Ledger, fleet: &FleetConfig) {
    for step in ledger.steps_mut() {
        let mut total = 0.0;
        let mut new_total = 0.0;
        for (state, unit) in step.units.iter_mut().zip(fleet.units()) {
            let per_unit = unit.effective_mwe();
            let fresh = state.count.saturating_sub(state.decommissioned);
            state.capacity = f64::from(state.count) * per_unit;
            state.new_capacity = f64::from(fresh) * per_unit;
            total += state.capacity;
            new_total += state.new_capacity;
        }
        step.total_capacity = total;
        step.new_total_capacity = new_total;
    }
}
