//! Per-step commodity mass moved between agents.

use serde::Serialize;
use tracing::warn;

use super::metrics::time_to_year;
use super::trace::{SimulationTrace, TransactionRecord};

/// Mass of one commodity traded per time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityFlow {
    pub time: Vec<usize>,
    pub year: Vec<f64>,
    /// Mass in kg, zero where nothing was traded.
    pub quantity: Vec<f64>,
}

impl CommodityFlow {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.quantity.iter().sum()
    }
}

fn sum_per_step<F>(
    trace: &SimulationTrace,
    commodity: &str,
    horizon: usize,
    start_year: i32,
    keep: F,
) -> CommodityFlow
where
    F: Fn(&TransactionRecord) -> bool,
{
    let mut quantity = vec![0.0; horizon];
    for tx in trace
        .transactions
        .iter()
        .filter(|tx| tx.commodity == commodity && keep(tx))
    {
        match quantity.get_mut(tx.time) {
            Some(slot) => *slot += tx.quantity,
            None => warn!(time = tx.time, horizon, commodity, "transaction past horizon skipped"),
        }
    }
    CommodityFlow {
        time: (0..horizon).collect(),
        year: (0..horizon).map(|t| time_to_year(t, start_year)).collect(),
        quantity,
    }
}

/// Total mass of `commodity` traded at each of `horizon` steps.
pub fn commodity_mass_traded(
    trace: &SimulationTrace,
    commodity: &str,
    horizon: usize,
    start_year: i32,
) -> CommodityFlow {
    sum_per_step(trace, commodity, horizon, start_year, |_| true)
}

/// Mass of `commodity` received by agents of `prototype` per step.
pub fn commodity_to_prototype(
    trace: &SimulationTrace,
    commodity: &str,
    prototype: &str,
    horizon: usize,
    start_year: i32,
) -> CommodityFlow {
    sum_per_step(trace, commodity, horizon, start_year, |tx| {
        tx.receiver_prototype == prototype
    })
}

/// Mass of `commodity` received by every prototype except `advanced`,
/// i.e. the legacy fleet, per step.
pub fn commodity_to_legacy(
    trace: &SimulationTrace,
    commodity: &str,
    advanced: &str,
    horizon: usize,
    start_year: i32,
) -> CommodityFlow {
    sum_per_step(trace, commodity, horizon, start_year, |tx| {
        tx.receiver_prototype != advanced
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::metrics::DEFAULT_START_YEAR;

    fn tx(time: usize, commodity: &str, receiver: &str, quantity: f64) -> TransactionRecord {
        TransactionRecord {
            time,
            commodity: commodity.to_string(),
            receiver_prototype: receiver.to_string(),
            quantity,
        }
    }

    fn trace() -> SimulationTrace {
        SimulationTrace {
            transactions: vec![
                tx(0, "fresh_uox", "LWR_1", 30.0),
                tx(0, "fresh_uox", "LWR_2", 10.0),
                tx(2, "fresh_uox", "Xe100", 5.0),
                tx(2, "fresh_uox", "LWR_1", 7.0),
                tx(2, "spent_uox", "repository", 100.0),
                tx(9, "fresh_uox", "Xe100", 1.0),
            ],
            ..SimulationTrace::default()
        }
    }

    #[test]
    fn mass_traded_sums_per_step_and_zero_fills() {
        let flow = commodity_mass_traded(&trace(), "fresh_uox", 4, DEFAULT_START_YEAR);
        assert_eq!(flow.time, vec![0, 1, 2, 3]);
        assert_eq!(flow.quantity, vec![40.0, 0.0, 12.0, 0.0]);
        assert_eq!(flow.year[2], 1965.17);
    }

    #[test]
    fn receiver_filters_split_the_commodity() {
        let xe = commodity_to_prototype(&trace(), "fresh_uox", "Xe100", 10, DEFAULT_START_YEAR);
        let legacy = commodity_to_legacy(&trace(), "fresh_uox", "Xe100", 10, DEFAULT_START_YEAR);
        let all = commodity_mass_traded(&trace(), "fresh_uox", 10, DEFAULT_START_YEAR);
        assert_eq!(xe.quantity[2], 5.0);
        assert_eq!(xe.quantity[9], 1.0);
        assert_eq!(legacy.quantity[0], 40.0);
        assert_eq!(legacy.quantity[2], 7.0);
        assert!((xe.total() + legacy.total() - all.total()).abs() < 1e-12);
    }

    #[test]
    fn unknown_commodity_gives_zero_column() {
        let flow = commodity_mass_traded(&trace(), "triso", 3, DEFAULT_START_YEAR);
        assert_eq!(flow.quantity, vec![0.0; 3]);
        assert_eq!(flow.len(), 3);
    }

    #[test]
    fn transactions_past_horizon_are_skipped() {
        let flow = commodity_to_prototype(&trace(), "fresh_uox", "Xe100", 5, DEFAULT_START_YEAR);
        assert_eq!(flow.total(), 5.0);
        assert!(commodity_mass_traded(&trace(), "fresh_uox", 0, DEFAULT_START_YEAR).is_empty());
    }
}
