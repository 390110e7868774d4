//! Simulator trace records: the external data the transition metrics read.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FleetError;

/// Entities of one prototype entering or leaving service at a time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvent {
    /// Simulation time step (months).
    pub time: usize,
    pub prototype: String,
    pub count: u32,
}

/// Electricity generated by one agent in one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub year: i32,
    pub agent_id: u64,
    pub prototype: String,
    /// Energy in MWe-yr.
    pub energy: f64,
}

/// Electricity generated by one agent in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEnergyRecord {
    /// Months since simulation start.
    pub month: usize,
    pub agent_id: u64,
    pub prototype: String,
    /// Energy in MWe-yr.
    pub energy: f64,
}

/// Material moved between agents, tagged with the receiving agent's
/// prototype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub time: usize,
    pub commodity: String,
    pub receiver_prototype: String,
    /// Mass in kg.
    pub quantity: f64,
}

/// Time-indexed commission, decommission, energy, and transaction records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTrace {
    pub commissions: Vec<EntityEvent>,
    pub decommissions: Vec<EntityEvent>,
    pub energy: Vec<EnergyRecord>,
    pub monthly_energy: Vec<MonthlyEnergyRecord>,
    pub transactions: Vec<TransactionRecord>,
}

impl SimulationTrace {
    /// Reads entity events from CSV with a `time,prototype,count` header.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Csv` on malformed rows.
    pub fn read_events<R: Read>(reader: R) -> Result<Vec<EntityEvent>, FleetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let events = rdr.deserialize().collect::<Result<Vec<EntityEvent>, _>>()?;
        Ok(events)
    }

    /// Reads energy records from CSV with a
    /// `year,agent_id,prototype,energy` header.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Csv` on malformed rows.
    pub fn read_energy<R: Read>(reader: R) -> Result<Vec<EnergyRecord>, FleetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let records = rdr.deserialize().collect::<Result<Vec<EnergyRecord>, _>>()?;
        Ok(records)
    }

    /// Reads monthly energy records from CSV with a
    /// `month,agent_id,prototype,energy` header.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Csv` on malformed rows.
    pub fn read_monthly_energy<R: Read>(reader: R) -> Result<Vec<MonthlyEnergyRecord>, FleetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let records = rdr.deserialize().collect::<Result<Vec<MonthlyEnergyRecord>, _>>()?;
        Ok(records)
    }

    /// Reads transactions from CSV with a
    /// `time,commodity,receiver_prototype,quantity` header.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Csv` on malformed rows.
    pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, FleetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let records = rdr.deserialize().collect::<Result<Vec<TransactionRecord>, _>>()?;
        Ok(records)
    }

    /// Loads a trace from CSV files. Decommission and energy files are
    /// optional; a missing one yields an empty series.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Io` if a file cannot be opened and
    /// `FleetError::Csv` if it cannot be parsed.
    pub fn from_csv_paths(
        commissions: &Path,
        decommissions: Option<&Path>,
        energy: Option<&Path>,
    ) -> Result<Self, FleetError> {
        let commissions = Self::read_events(File::open(commissions)?)?;
        let decommissions = match decommissions {
            Some(path) => Self::read_events(File::open(path)?)?,
            None => Vec::new(),
        };
        let energy = match energy {
            Some(path) => Self::read_energy(File::open(path)?)?,
            None => Vec::new(),
        };
        Ok(Self {
            commissions,
            decommissions,
            energy,
            ..Self::default()
        })
    }

    /// Adds the transactions in the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Io` if the file cannot be opened and
    /// `FleetError::Csv` if it cannot be parsed.
    pub fn with_transactions(mut self, path: &Path) -> Result<Self, FleetError> {
        self.transactions = Self::read_transactions(File::open(path)?)?;
        Ok(self)
    }

    /// Adds the monthly energy records in the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::Io` if the file cannot be opened and
    /// `FleetError::Csv` if it cannot be parsed.
    pub fn with_monthly_energy(mut self, path: &Path) -> Result<Self, FleetError> {
        self.monthly_energy = Self::read_monthly_energy(File::open(path)?)?;
        Ok(self)
    }

    /// One past the latest time step referenced by any event or
    /// transaction.
    pub fn horizon(&self) -> usize {
        self.commissions
            .iter()
            .chain(&self.decommissions)
            .map(|e| e.time + 1)
            .chain(self.transactions.iter().map(|t| t.time + 1))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_parse_from_csv() {
        let csv = "time,prototype,count\n0,LWR_A,2\n5,Xe100,1\n";
        let events = SimulationTrace::read_events(csv.as_bytes()).expect("parse");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].prototype, "Xe100");
        assert_eq!(events[1].time, 5);
    }

    #[test]
    fn energy_parses_from_csv() {
        let csv = "year,agent_id,prototype,energy\n2025,17,Xe100,80.5\n";
        let records = SimulationTrace::read_energy(csv.as_bytes()).expect("parse");
        assert_eq!(records[0].agent_id, 17);
        assert!((records[0].energy - 80.5).abs() < 1e-12);
    }

    #[test]
    fn malformed_rows_are_errors() {
        let csv = "time,prototype,count\nsoon,LWR_A,2\n";
        assert!(matches!(
            SimulationTrace::read_events(csv.as_bytes()),
            Err(FleetError::Csv(_))
        ));
    }

    #[test]
    fn horizon_covers_latest_event() {
        let trace = SimulationTrace {
            commissions: vec![EntityEvent {
                time: 3,
                prototype: "A".into(),
                count: 1,
            }],
            decommissions: vec![EntityEvent {
                time: 9,
                prototype: "A".into(),
                count: 1,
            }],
            ..SimulationTrace::default()
        };
        assert_eq!(trace.horizon(), 10);
        assert_eq!(SimulationTrace::default().horizon(), 0);
    }

    #[test]
    fn transactions_parse_and_extend_horizon() {
        let csv = "time,commodity,receiver_prototype,quantity\n\
                   0,fresh_uox,LWR_A,33000.0\n\
                   14,fresh_uox,Xe100,1.5\n";
        let transactions = SimulationTrace::read_transactions(csv.as_bytes()).expect("parse");
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[1].receiver_prototype, "Xe100");
        assert!((transactions[0].quantity - 33000.0).abs() < 1e-9);

        let trace = SimulationTrace {
            transactions,
            ..SimulationTrace::default()
        };
        assert_eq!(trace.horizon(), 15);
    }

    #[test]
    fn monthly_energy_parses_from_csv() {
        let csv = "month,agent_id,prototype,energy\n7,3,LWR_A,75.0\n";
        let records = SimulationTrace::read_monthly_energy(csv.as_bytes()).expect("parse");
        assert_eq!(records[0].month, 7);
        assert_eq!(records[0].prototype, "LWR_A");
    }

    #[test]
    fn transaction_file_loads_onto_trace() {
        let path = std::env::temp_dir().join(format!(
            "fleet_deploy_transactions_{}.csv",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "time,commodity,receiver_prototype,quantity\n2,triso,Xe100,4.0\n",
        )
        .expect("write fixture");
        let loaded = SimulationTrace::default().with_transactions(&path);
        let _ = std::fs::remove_file(&path);
        let trace = loaded.expect("load");
        assert_eq!(trace.transactions.len(), 1);
        assert_eq!(trace.transactions[0].commodity, "triso");

        assert!(matches!(
            SimulationTrace::default().with_transactions(Path::new("/nonexistent/tx.csv")),
            Err(FleetError::Io(_))
        ));
    }
}
