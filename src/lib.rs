//! Reactor fleet deployment and capacity accounting against a demand curve.

/// Command-line arguments and scenario overrides.
pub mod cli;
/// TOML scenarios, presets, and validation.
pub mod config;
/// Library error type.
pub mod error;
/// Unit types and the immutable fleet configuration.
pub mod fleet;
/// CSV and JSON export.
pub mod io;
/// Tracing subscriber setup.
pub mod logging;
/// Ledger, deployment policies, decommissioning, and scoring.
pub mod sim;
/// Deployment and electricity metrics over external simulator traces.
pub mod transition;
/// Spent-fuel cask accounting.
pub mod waste;
