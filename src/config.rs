//! TOML-based scenario configuration and preset definitions.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::FleetError;
use crate::fleet::{FleetConfig, UnitType};
use crate::sim::deploy::{Greedy, Policy, Predetermined, RandomGreedy};
use crate::waste::{CaskCalculator, ElementLevel, PackagingConstants};

/// Demand curve shared by the built-in presets (MWe per year).
const PRESET_DEMAND: [f64; 9] = [20.0, 79.0, 80.0, 81.0, 220.0, 640.0, 693.0, 950.0, 700.0];

/// Top-level scenario configuration parsed from TOML.
///
/// `demand` must appear before any table in the file. Its length is the
/// horizon. `units` is an array of tables whose order breaks ties between
/// equally sized unit types.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Run-wide parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Capacity target per time step (MWe).
    #[serde(default)]
    pub demand: Vec<f64>,
    /// Unit types, in tie-break order.
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    /// Optional spent-fuel cask calculation.
    #[serde(default)]
    pub cask: Option<CaskConfig>,
}

/// Run-wide parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Calendar year of the first time step.
    pub start_year: i32,
    /// Deployment policy: `"greedy"`, `"predetermined"`, or `"random"`.
    pub policy: String,
    /// Predetermined policy only: fill residual demand greedily (`true`)
    /// or with linear bundles (`false`).
    pub greedy_fallback: bool,
    /// Seed for the random policy.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: 2016,
            policy: "greedy".to_string(),
            greedy_fallback: true,
            seed: 42,
        }
    }
}

fn default_capacity_factor() -> f64 {
    1.0
}

/// One unit type entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitConfig {
    pub name: String,
    /// Nameplate power (MWe).
    pub power_mwe: f64,
    /// Capacity factor in (0, 1]. Defaults to 1.
    #[serde(default = "default_capacity_factor")]
    pub capacity_factor: f64,
    /// Lifetime in time steps.
    pub lifetime: usize,
    /// Fixed commissions per step; omit to fill greedily.
    #[serde(default)]
    pub distribution: Option<Vec<u32>>,
}

/// Spent-fuel mass discharged in one year.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MassEntry {
    pub year: i32,
    /// Mass in kg.
    pub kg: f64,
}

/// Cask calculation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaskConfig {
    /// Element level: `"prism"`, `"triso"`, or `"kernel"`.
    pub element: String,
    pub constants: PackagingConstants,
    #[serde(default)]
    pub mass: Vec<MassEntry>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"units[0].lifetime"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn unit(name: &str, power_mwe: f64, lifetime: usize, distribution: Option<Vec<u32>>) -> UnitConfig {
    UnitConfig {
        name: name.to_string(),
        power_mwe,
        capacity_factor: 1.0,
        lifetime,
        distribution,
    }
}

impl ScenarioConfig {
    /// Three-unit fleet deployed greedily against the preset demand curve.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            demand: PRESET_DEMAND.to_vec(),
            units: vec![
                unit("ReactorBig", 80.0, 6, None),
                unit("ReactorMedium", 20.0, 4, None),
                unit("ReactorSmall", 5.0, 2, None),
            ],
            cask: None,
        }
    }

    /// Baseline fleet with an alternating schedule for the largest unit.
    pub fn predetermined() -> Self {
        let mut cfg = Self::baseline();
        cfg.simulation.policy = "predetermined".to_string();
        cfg.units[0].distribution = Some(vec![1, 2, 1, 2, 1, 2, 1, 2, 1]);
        cfg
    }

    /// Deployment cap expressed as a constant schedule for the largest unit.
    pub fn set_cap() -> Self {
        let mut cfg = Self::baseline();
        cfg.simulation.policy = "predetermined".to_string();
        cfg.units[0].distribution = Some(vec![2; PRESET_DEMAND.len()]);
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "predetermined", "set_cap"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "predetermined" => Ok(Self::predetermined()),
            "set_cap" => Ok(Self::set_cap()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !matches!(s.policy.as_str(), "greedy" | "predetermined" | "random") {
            errors.push(ConfigError::new(
                "simulation.policy",
                format!(
                    "must be \"greedy\", \"predetermined\", or \"random\", got \"{}\"",
                    s.policy
                ),
            ));
        }

        if self.demand.is_empty() {
            errors.push(ConfigError::new("demand", "must contain at least one step"));
        }
        for (t, d) in self.demand.iter().enumerate() {
            if !(d.is_finite() && *d >= 0.0) {
                errors.push(ConfigError::new(format!("demand[{t}]"), "must be >= 0"));
            }
        }

        if self.units.is_empty() {
            errors.push(ConfigError::new("units", "must declare at least one unit type"));
        }
        for (i, u) in self.units.iter().enumerate() {
            if self.units[..i].iter().any(|other| other.name == u.name) {
                errors.push(ConfigError::new(
                    format!("units[{i}].name"),
                    format!("duplicate unit type \"{}\"", u.name),
                ));
            }
            if !(u.power_mwe.is_finite() && u.power_mwe > 0.0) {
                errors.push(ConfigError::new(format!("units[{i}].power_mwe"), "must be > 0"));
            }
            if !(u.capacity_factor > 0.0 && u.capacity_factor <= 1.0) {
                errors.push(ConfigError::new(
                    format!("units[{i}].capacity_factor"),
                    "must be in (0.0, 1.0]",
                ));
            }
            if u.lifetime == 0 {
                errors.push(ConfigError::new(format!("units[{i}].lifetime"), "must be > 0"));
            }
        }

        if let Some(cask) = &self.cask {
            if let Err(e) = cask.element.parse::<ElementLevel>() {
                errors.push(ConfigError::new("cask.element", e.to_string()));
            }
            let mut years: Vec<i32> = cask.mass.iter().map(|m| m.year).collect();
            years.sort_unstable();
            years.dedup();
            if years.len() != cask.mass.len() {
                errors.push(ConfigError::new("cask.mass", "years must be unique"));
            }
            if cask.mass.iter().any(|m| !(m.kg.is_finite() && m.kg >= 0.0)) {
                errors.push(ConfigError::new("cask.mass", "masses must be >= 0"));
            }
        }

        errors
    }

    /// Builds the immutable fleet configuration.
    ///
    /// # Errors
    ///
    /// Returns a `FleetError` for any malformed unit type.
    pub fn fleet(&self) -> Result<FleetConfig, FleetError> {
        let units = self
            .units
            .iter()
            .map(|u| {
                let base = UnitType::new(u.name.clone(), u.power_mwe, u.capacity_factor, u.lifetime);
                match &u.distribution {
                    Some(d) => base.with_distribution(d.clone()),
                    None => base,
                }
            })
            .collect();
        FleetConfig::new(units)
    }

    /// Deployment policy selected by `simulation.policy`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on `simulation.policy` for a name other than
    /// `greedy`, `predetermined`, or `random`.
    pub fn policy(&self) -> Result<Policy, ConfigError> {
        let s = &self.simulation;
        match s.policy.as_str() {
            "greedy" => Ok(Policy::Greedy(Greedy)),
            "predetermined" => Ok(Policy::Predetermined(Predetermined::new(s.greedy_fallback))),
            "random" => Ok(Policy::RandomGreedy(RandomGreedy::new(s.seed))),
            other => Err(ConfigError::new(
                "simulation.policy",
                format!("unknown policy \"{other}\""),
            )),
        }
    }

    /// Cask calculator for the `[cask]` table, if present.
    ///
    /// # Errors
    ///
    /// Returns a `FleetError` for an unknown element level or missing
    /// packaging constants.
    pub fn cask_calculator(&self) -> Option<Result<CaskCalculator, FleetError>> {
        self.cask.as_ref().map(|c| {
            let masses: BTreeMap<i32, f64> = c.mass.iter().map(|m| (m.year, m.kg)).collect();
            CaskCalculator::from_name(&c.element, masses, c.constants.clone())
        })
    }
}
