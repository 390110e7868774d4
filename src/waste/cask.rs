//! Storage cask sizing for spent fuel packaged as prisms, TRISO particles,
//! or fuel kernels.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FleetError;

/// Packaging granularity loaded into casks, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementLevel {
    /// Graphite prism fuel block.
    Prism,
    /// TRISO particle.
    Triso,
    /// Bare fuel kernel.
    Kernel,
}

impl FromStr for ElementLevel {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prism" => Ok(Self::Prism),
            "triso" => Ok(Self::Triso),
            "kernel" => Ok(Self::Kernel),
            other => Err(FleetError::UnknownElement(other.to_string())),
        }
    }
}

impl fmt::Display for ElementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Prism => "prism",
            Self::Triso => "triso",
            Self::Kernel => "kernel",
        };
        f.write_str(s)
    }
}

/// Geometric and density constants of the packaging chain.
///
/// Prism constants are always required. TRISO and kernel constants are
/// only needed when counting at those levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingConstants {
    /// Fillable volume of one cask (m^3).
    pub cask_volume: f64,
    /// Volume of one prism (m^3).
    pub prism_volume: f64,
    /// Mass of spent fuel per prism (kg).
    pub prism_mass: f64,
    /// Volume of one TRISO particle (m^3).
    pub triso_volume: Option<f64>,
    /// TRISO particles per prism.
    pub trisos_per_prism: Option<f64>,
    /// Volume of one kernel (m^3).
    pub kernel_volume: Option<f64>,
    /// Kernels per TRISO particle.
    pub kernels_per_triso: Option<f64>,
}

fn positive(name: &'static str, value: f64) -> Result<f64, FleetError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FleetError::InvalidPackagingConstant { name, value })
    }
}

fn required(name: &'static str, value: Option<f64>) -> Result<f64, FleetError> {
    positive(name, value.ok_or(FleetError::MissingPackagingConstant(name))?)
}

impl PackagingConstants {
    /// Volume of one element at `level`.
    fn element_volume(&self, level: ElementLevel) -> Result<f64, FleetError> {
        match level {
            ElementLevel::Prism => positive("prism_volume", self.prism_volume),
            ElementLevel::Triso => required("triso_volume", self.triso_volume),
            ElementLevel::Kernel => required("kernel_volume", self.kernel_volume),
        }
    }
}

/// One year of the cask schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaskRow {
    pub year: i32,
    /// Elements produced this year (fractional).
    pub elements: f64,
    /// Whole casks filled this year.
    pub casks: u64,
    /// Fraction of a cask carried into the next year, in [0, 1).
    pub leftover: f64,
}

/// Per-year cask counts with carried remainders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaskSchedule {
    pub level: ElementLevel,
    pub rows: Vec<CaskRow>,
}

impl CaskSchedule {
    pub fn total_casks(&self) -> u64 {
        self.rows.iter().map(|r| r.casks).sum()
    }

    /// Cask fraction left after the final year. It is never packed.
    pub fn unpacked_remainder(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.leftover)
    }
}

/// Converts annual spent-fuel mass into packaging elements and casks.
#[derive(Debug, Clone)]
pub struct CaskCalculator {
    level: ElementLevel,
    masses: BTreeMap<i32, f64>,
    constants: PackagingConstants,
}

impl CaskCalculator {
    /// Creates a calculator for `level`, validating every yearly mass and
    /// every constant that level needs up front.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::InvalidMass` for a negative or non-finite mass,
    /// and `FleetError::MissingPackagingConstant` or
    /// `FleetError::InvalidPackagingConstant` for an absent or
    /// non-positive constant.
    pub fn new(
        level: ElementLevel,
        masses: BTreeMap<i32, f64>,
        constants: PackagingConstants,
    ) -> Result<Self, FleetError> {
        if let Some((&year, &value)) = masses.iter().find(|(_, m)| !(m.is_finite() && **m >= 0.0)) {
            return Err(FleetError::InvalidMass { year, value });
        }
        let calc = Self {
            level,
            masses,
            constants,
        };
        positive("cask_volume", calc.constants.cask_volume)?;
        positive("prism_mass", calc.constants.prism_mass)?;
        calc.constants.element_volume(level)?;
        calc.per_prism(level)?;
        Ok(calc)
    }

    /// Like [`CaskCalculator::new`] with the level given by name.
    ///
    /// # Errors
    ///
    /// Returns `FleetError::UnknownElement` for a name other than
    /// `prism`, `triso`, or `kernel`.
    pub fn from_name(
        level: &str,
        masses: BTreeMap<i32, f64>,
        constants: PackagingConstants,
    ) -> Result<Self, FleetError> {
        Self::new(level.parse()?, masses, constants)
    }

    pub fn level(&self) -> ElementLevel {
        self.level
    }

    /// Elements of one kind contained in a single prism.
    fn per_prism(&self, level: ElementLevel) -> Result<f64, FleetError> {
        let c = &self.constants;
        Ok(match level {
            ElementLevel::Prism => 1.0,
            ElementLevel::Triso => required("trisos_per_prism", c.trisos_per_prism)?,
            ElementLevel::Kernel => {
                required("trisos_per_prism", c.trisos_per_prism)?
                    * required("kernels_per_triso", c.kernels_per_triso)?
            }
        })
    }

    /// Element count per year at `level`, in ascending year order.
    ///
    /// Chains `mass / prism_mass`, then `* trisos_per_prism`, then
    /// `* kernels_per_triso` down to the requested level.
    ///
    /// # Errors
    ///
    /// Returns a packaging-constant error if `level` needs a constant that
    /// was not supplied.
    pub fn num_elements(&self, level: ElementLevel) -> Result<Vec<f64>, FleetError> {
        let factor = self.per_prism(level)?;
        Ok(self
            .masses
            .values()
            .map(|mass| mass / self.constants.prism_mass * factor)
            .collect())
    }

    /// Packs each year's elements into whole casks, carrying the
    /// fractional remainder into the next year.
    ///
    /// The final year's remainder stays unpacked.
    ///
    /// # Errors
    ///
    /// Returns a packaging-constant error for the configured level.
    pub fn casks(&self) -> Result<CaskSchedule, FleetError> {
        let elements = self.num_elements(self.level)?;
        let volume = self.constants.element_volume(self.level)?;
        let mut carried = 0.0_f64;
        let mut rows = Vec::with_capacity(elements.len());
        for (&year, &count) in self.masses.keys().zip(&elements) {
            let fill = count * volume / self.constants.cask_volume + carried;
            let whole = fill.floor();
            carried = fill - whole;
            rows.push(CaskRow {
                year,
                elements: count,
                casks: whole as u64,
                leftover: carried,
            });
        }
        if carried > 0.0 {
            warn!(
                level = %self.level,
                remainder = carried,
                "final cask fraction left unpacked"
            );
        }
        Ok(CaskSchedule {
            level: self.level,
            rows,
        })
    }
}
