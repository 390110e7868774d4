//! File output for ledgers, score reports, and cask schedules.

/// CSV and JSON writers.
pub mod export;

pub use export::{
    export_casks_csv, export_ledger_csv, export_report_json, write_casks_csv, write_ledger_csv,
    write_report_json,
};
