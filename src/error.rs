//! Error type shared by every pipeline stage.

use std::io;

use thiserror::Error;

/// Failures reported by configuration loading, deployment, scoring, and
/// the waste and transition calculators.
///
/// Configuration variants are raised before any deployment step runs.
/// Numerical variants invalidate the whole report of the stage that hit
/// them.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet configuration has no unit types")]
    EmptyFleet,
    #[error("unit type \"{0}\" is declared more than once")]
    DuplicateUnit(String),
    #[error("unit type \"{name}\": power must be a positive finite MWe value, got {power}")]
    InvalidPower { name: String, power: f64 },
    #[error("unit type \"{name}\": capacity factor must be in (0, 1], got {factor}")]
    InvalidCapacityFactor { name: String, factor: f64 },
    #[error("unit type \"{0}\": lifetime must be at least one step")]
    InvalidLifetime(String),
    #[error("demand at step {step} must be a non-negative finite value, got {value}")]
    InvalidDemand { step: usize, value: f64 },
    #[error("{what} has {actual} steps but the ledger horizon is {expected}")]
    HorizonMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unknown unit type \"{0}\"")]
    UnknownUnit(String),
    #[error("unknown packaging element \"{0}\", expected prism, triso, or kernel")]
    UnknownElement(String),
    #[error("packaging constant `{0}` is required for this element level")]
    MissingPackagingConstant(&'static str),
    #[error("packaging constant `{name}` must be positive, got {value}")]
    InvalidPackagingConstant { name: &'static str, value: f64 },
    #[error("mass fraction `{name}` must be in (0, 1), got {value}")]
    InvalidAssay { name: &'static str, value: f64 },
    #[error("unit type #{unit}: {requested} units at step {step} exceed the per-step count limit")]
    CountOverflow {
        unit: usize,
        step: usize,
        requested: f64,
    },
    #[error("spent-fuel mass for {year} must be a non-negative finite value, got {value}")]
    InvalidMass { year: i32, value: f64 },
    #[error("total capacity over the horizon is zero; per-unit shares are undefined")]
    ZeroTotalCapacity,
    #[error("percent difference is undefined at step {step}: demand is zero")]
    UndefinedPercentDifference { step: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
