//! Command-line arguments and their application to a scenario.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::warn;

use crate::config::{ConfigError, ScenarioConfig};

/// Deployment policy override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Greedy,
    Predetermined,
    Random,
}

impl PolicyArg {
    fn as_config_str(self) -> &'static str {
        match self {
            PolicyArg::Greedy => "greedy",
            PolicyArg::Predetermined => "predetermined",
            PolicyArg::Random => "random",
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Reactor fleet deployment against a demand curve", long_about = None)]
pub struct Args {
    /// Load scenario from TOML config file
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, predetermined, set_cap)
    #[arg(long)]
    pub preset: Option<String>,

    /// Override the deployment policy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    #[arg(long, help = "Random seed for the random policy")]
    pub seed: Option<u64>,

    /// Fill residual demand with linear bundles instead of greedily
    #[arg(long, default_value_t = false)]
    pub linear: bool,

    /// Export the capacity ledger to CSV
    #[arg(long)]
    pub ledger_out: Option<PathBuf>,

    /// Export the cask schedule to CSV
    #[arg(long)]
    pub casks_out: Option<PathBuf>,

    /// Export the score report to JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Loads the selected scenario (preset `baseline` when neither
    /// `--scenario` nor `--preset` is given) and applies overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unreadable file, invalid TOML, or an
    /// unknown preset.
    pub fn load_scenario(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut cfg = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(path)?,
            (None, Some(name)) => ScenarioConfig::from_preset(name)?,
            (None, None) => ScenarioConfig::baseline(),
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    /// Logs a warning for each export flag the scenario cannot satisfy and
    /// returns whether any was found.
    pub fn warn_unused_outputs(&self, cfg: &ScenarioConfig) -> bool {
        let unused = self.casks_out.is_some() && cfg.cask.is_none();
        if unused {
            warn!("--casks-out ignored, scenario has no [cask] table");
        }
        unused
    }

    /// Applies `--policy`, `--seed`, and `--linear` to `cfg`.
    pub fn apply_overrides(&self, cfg: &mut ScenarioConfig) {
        if let Some(policy) = self.policy {
            cfg.simulation.policy = policy.as_config_str().to_string();
        }
        if let Some(seed) = self.seed {
            cfg.simulation.seed = seed;
        }
        if self.linear {
            cfg.simulation.greedy_fallback = false;
        }
    }
}
