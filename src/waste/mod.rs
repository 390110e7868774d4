//! Spent-fuel packaging and storage cask accounting.

/// Element counts and casks per year of spent fuel.
pub mod cask;

pub use cask::{CaskCalculator, CaskRow, CaskSchedule, ElementLevel, PackagingConstants};
