//! CSV export for the capacity ledger and the cask schedule.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::FleetError;
use crate::fleet::FleetConfig;
use crate::sim::ledger::Ledger;
use crate::sim::score::ScoreReport;
use crate::waste::CaskSchedule;

/// Column header for the cask schedule export.
const CASK_HEADER: [&str; 4] = ["year", "elements", "casks", "leftover"];

/// Header for a ledger with the given fleet: fixed leading columns, four
/// columns per unit type in fleet order, then the totals.
pub fn ledger_header(fleet: &FleetConfig) -> Vec<String> {
    let mut header = vec!["step".to_string(), "year".to_string(), "demand".to_string()];
    for unit in fleet.units() {
        header.push(format!("num_{}", unit.name));
        header.push(format!("decom_{}", unit.name));
        header.push(format!("cap_{}", unit.name));
        header.push(format!("new_cap_{}", unit.name));
    }
    header.push("total_cap".to_string());
    header.push("new_cap".to_string());
    header
}

/// Exports the ledger to a CSV file at the given path.
///
/// # Errors
///
/// Returns a `FleetError` if file creation or writing fails.
pub fn export_ledger_csv(ledger: &Ledger, fleet: &FleetConfig, path: &Path) -> Result<(), FleetError> {
    let file = File::create(path)?;
    write_ledger_csv(ledger, fleet, io::BufWriter::new(file))
}

/// Writes the ledger as CSV to any writer. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns a `FleetError` if writing fails.
pub fn write_ledger_csv(ledger: &Ledger, fleet: &FleetConfig, writer: impl Write) -> Result<(), FleetError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(ledger_header(fleet))?;

    for s in ledger.steps() {
        let mut record = vec![s.step.to_string(), s.year.to_string(), format!("{:.4}", s.demand)];
        for u in &s.units {
            record.push(u.count.to_string());
            record.push(u.decommissioned.to_string());
            record.push(format!("{:.4}", u.capacity));
            record.push(format!("{:.4}", u.new_capacity));
        }
        record.push(format!("{:.4}", s.total_capacity));
        record.push(format!("{:.4}", s.new_total_capacity));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a cask schedule to a CSV file at the given path.
///
/// # Errors
///
/// Returns a `FleetError` if file creation or writing fails.
pub fn export_casks_csv(schedule: &CaskSchedule, path: &Path) -> Result<(), FleetError> {
    let file = File::create(path)?;
    write_casks_csv(schedule, io::BufWriter::new(file))
}

/// Writes a cask schedule as CSV to any writer.
///
/// # Errors
///
/// Returns a `FleetError` if writing fails.
pub fn write_casks_csv(schedule: &CaskSchedule, writer: impl Write) -> Result<(), FleetError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CASK_HEADER)?;
    for r in &schedule.rows {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.6}", r.elements),
            r.casks.to_string(),
            format!("{:.6}", r.leftover),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a score report as pretty-printed JSON to the given path.
///
/// # Errors
///
/// Returns a `FleetError` if file creation or serialization fails.
pub fn export_report_json(report: &ScoreReport, path: &Path) -> Result<(), FleetError> {
    let file = File::create(path)?;
    write_report_json(report, io::BufWriter::new(file))
}

/// Writes a score report as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns a `FleetError` if serialization or writing fails.
pub fn write_report_json(report: &ScoreReport, mut writer: impl Write) -> Result<(), FleetError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::UnitType;
    use crate::sim::capacity::counts_to_capacity;
    use crate::sim::score::score;
    use crate::waste::{CaskRow, ElementLevel};

    fn fleet() -> FleetConfig {
        FleetConfig::new(vec![
            UnitType::new("Big", 80.0, 1.0, 6),
            UnitType::new("Small", 5.0, 1.0, 2),
        ])
        .expect("fleet should be valid")
    }

    fn ledger(steps: usize) -> Ledger {
        let f = fleet();
        let demand = vec![85.0; steps];
        let mut ledger = Ledger::new(&demand, 2016, &f).expect("valid demand");
        for t in 0..steps {
            ledger.commission(t, 0, 1).expect("count fits");
            ledger.commission(t, 1, 1).expect("count fits");
        }
        counts_to_capacity(&mut ledger, &f);
        ledger
    }

    #[test]
    fn header_has_four_columns_per_unit() {
        let header = ledger_header(&fleet());
        assert_eq!(header.len(), 3 + 4 * 2 + 2);
        assert_eq!(header[3], "num_Big");
        assert_eq!(header[header.len() - 1], "new_cap");
    }

    #[test]
    fn row_count_matches_step_count() {
        let mut buf = Vec::new();
        write_ledger_csv(&ledger(9), &fleet(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 9 data rows
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn deterministic_output() {
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_ledger_csv(&ledger(5), &fleet(), &mut buf1).ok();
        write_ledger_csv(&ledger(5), &fleet(), &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn ledger_csv_is_parseable() {
        let mut buf = Vec::new();
        write_ledger_csv(&ledger(3), &fleet(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(13));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let total: Result<f64, _> = rec.as_ref().map_or("", |r| &r[11]).parse();
            assert_eq!(total.ok(), Some(85.0));
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }

    #[test]
    fn cask_csv_has_one_row_per_year() {
        let schedule = CaskSchedule {
            level: ElementLevel::Prism,
            rows: vec![
                CaskRow {
                    year: 2030,
                    elements: 12.0,
                    casks: 2,
                    leftover: 0.4,
                },
                CaskRow {
                    year: 2031,
                    elements: 7.0,
                    casks: 1,
                    leftover: 0.8,
                },
            ],
        };
        let mut buf = Vec::new();
        write_casks_csv(&schedule, &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("year,elements,casks,leftover"));
        assert_eq!(lines.next(), Some("2030,12.000000,2,0.400000"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn report_json_marks_undefined_percent() {
        let f = fleet();
        let mut ledger = Ledger::new(&[0.0, 85.0], 2016, &f).expect("valid demand");
        ledger.commission(1, 0, 1).expect("count fits");
        ledger.commission(1, 1, 1).expect("count fits");
        counts_to_capacity(&mut ledger, &f);
        let achieved = ledger.new_capacity_column();
        let report = score(&ledger, &ledger.demand_column(), &achieved, &f).expect("score");

        let mut buf = Vec::new();
        write_report_json(&report, &mut buf).expect("json written");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["equal_count"], 2);
        assert_eq!(value["steps"][0]["percent"]["kind"], "undefined");
        assert_eq!(value["steps"][1]["percent"]["kind"], "defined");
        assert_eq!(value["shares"][0]["name"], "Big");
    }
}
