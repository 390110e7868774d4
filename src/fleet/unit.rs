use std::collections::HashSet;

use crate::error::FleetError;

/// One category of generation asset (a reactor prototype).
///
/// Immutable once the fleet is built. `distribution` is `None` when the
/// type has no fixed per-step schedule and is filled greedily.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitType {
    /// Prototype name, unique within a fleet.
    pub name: String,
    /// Nameplate power of one unit (MWe).
    pub power_mwe: f64,
    /// Fraction of nameplate power realized on average.
    pub capacity_factor: f64,
    /// Operating lifetime in whole time steps.
    pub lifetime: usize,
    /// Fixed commission counts, index-aligned to time steps.
    pub distribution: Option<Vec<u32>>,
}

impl UnitType {
    /// Creates a unit type without a fixed distribution.
    pub fn new(name: impl Into<String>, power_mwe: f64, capacity_factor: f64, lifetime: usize) -> Self {
        Self {
            name: name.into(),
            power_mwe,
            capacity_factor,
            lifetime,
            distribution: None,
        }
    }

    /// Attaches a per-step commission schedule.
    pub fn with_distribution(mut self, distribution: Vec<u32>) -> Self {
        self.distribution = Some(distribution);
        self
    }

    /// Realized capacity of one unit: `power * capacity_factor`.
    pub fn effective_mwe(&self) -> f64 {
        self.power_mwe * self.capacity_factor
    }

    /// Scheduled commissions at `step`, zero past the end of the
    /// distribution. `None` for undistributed types.
    pub fn scheduled_at(&self, step: usize) -> Option<u32> {
        self.distribution
            .as_ref()
            .map(|d| d.get(step).copied().unwrap_or(0))
    }

    fn validate(&self) -> Result<(), FleetError> {
        if !(self.power_mwe.is_finite() && self.power_mwe > 0.0) {
            return Err(FleetError::InvalidPower {
                name: self.name.clone(),
                power: self.power_mwe,
            });
        }
        if !(self.capacity_factor > 0.0 && self.capacity_factor <= 1.0) {
            return Err(FleetError::InvalidCapacityFactor {
                name: self.name.clone(),
                factor: self.capacity_factor,
            });
        }
        if self.lifetime == 0 {
            return Err(FleetError::InvalidLifetime(self.name.clone()));
        }
        Ok(())
    }
}

/// Ordered, validated set of unit types.
///
/// Declaration order is significant: it breaks ties between types of equal
/// nameplate power. Every ledger row stores its per-unit state in this
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetConfig {
    units: Vec<UnitType>,
}

impl FleetConfig {
    /// Builds a fleet, failing fast on any malformed unit type.
    ///
    /// # Errors
    ///
    /// Returns a `FleetError` for an empty fleet, duplicate names, or a
    /// unit with non-positive power, a capacity factor outside (0, 1], or
    /// a zero lifetime.
    pub fn new(units: Vec<UnitType>) -> Result<Self, FleetError> {
        if units.is_empty() {
            return Err(FleetError::EmptyFleet);
        }
        let mut seen = HashSet::new();
        for unit in &units {
            if !seen.insert(unit.name.as_str()) {
                return Err(FleetError::DuplicateUnit(unit.name.clone()));
            }
            unit.validate()?;
        }
        Ok(Self { units })
    }

    pub fn units(&self) -> &[UnitType] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, index: usize) -> &UnitType {
        &self.units[index]
    }

    /// Position of the named unit type in declaration order.
    pub fn index_of(&self, name: &str) -> Result<usize, FleetError> {
        self.units
            .iter()
            .position(|u| u.name == name)
            .ok_or_else(|| FleetError::UnknownUnit(name.to_string()))
    }

    /// Indices sorted largest nameplate power first; equal powers keep
    /// declaration order.
    pub fn largest_first(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.units.len()).collect();
        order.sort_by(|&a, &b| self.units[b].power_mwe.total_cmp(&self.units[a].power_mwe));
        order
    }

    /// Largest-first indices of the types without a fixed distribution.
    pub fn undistributed_largest_first(&self) -> Vec<usize> {
        self.largest_first()
            .into_iter()
            .filter(|&i| self.units[i].distribution.is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_unit_fleet() -> FleetConfig {
        FleetConfig::new(vec![
            UnitType::new("Small", 5.0, 1.0, 2),
            UnitType::new("Big", 80.0, 1.0, 6),
            UnitType::new("Medium", 20.0, 1.0, 4),
        ])
        .expect("fleet should be valid")
    }

    #[test]
    fn largest_first_sorts_by_power() {
        let fleet = three_unit_fleet();
        assert_eq!(fleet.largest_first(), vec![1, 2, 0]);
    }

    #[test]
    fn equal_power_keeps_declaration_order() {
        let fleet = FleetConfig::new(vec![
            UnitType::new("A", 20.0, 1.0, 4),
            UnitType::new("B", 80.0, 1.0, 4),
            UnitType::new("C", 20.0, 1.0, 4),
        ])
        .expect("fleet should be valid");
        assert_eq!(fleet.largest_first(), vec![1, 0, 2]);
    }

    #[test]
    fn empty_fleet_rejected() {
        assert!(matches!(FleetConfig::new(vec![]), Err(FleetError::EmptyFleet)));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = FleetConfig::new(vec![
            UnitType::new("A", 20.0, 1.0, 4),
            UnitType::new("A", 10.0, 1.0, 4),
        ]);
        assert!(matches!(err, Err(FleetError::DuplicateUnit(n)) if n == "A"));
    }

    #[test]
    fn non_positive_power_rejected() {
        let err = FleetConfig::new(vec![UnitType::new("A", 0.0, 1.0, 4)]);
        assert!(matches!(err, Err(FleetError::InvalidPower { .. })));
    }

    #[test]
    fn capacity_factor_bounds() {
        let zero = FleetConfig::new(vec![UnitType::new("A", 10.0, 0.0, 4)]);
        assert!(matches!(zero, Err(FleetError::InvalidCapacityFactor { .. })));
        let one = FleetConfig::new(vec![UnitType::new("A", 10.0, 1.0, 4)]);
        assert!(one.is_ok());
    }

    #[test]
    fn zero_lifetime_rejected() {
        let err = FleetConfig::new(vec![UnitType::new("A", 10.0, 0.9, 0)]);
        assert!(matches!(err, Err(FleetError::InvalidLifetime(_))));
    }

    #[test]
    fn scheduled_at_pads_with_zero() {
        let unit = UnitType::new("A", 10.0, 1.0, 4).with_distribution(vec![1, 2]);
        assert_eq!(unit.scheduled_at(1), Some(2));
        assert_eq!(unit.scheduled_at(5), Some(0));
        assert_eq!(UnitType::new("B", 1.0, 1.0, 1).scheduled_at(0), None);
    }

    #[test]
    fn index_of_unknown_unit() {
        let fleet = three_unit_fleet();
        assert_eq!(fleet.index_of("Medium").ok(), Some(2));
        assert!(matches!(fleet.index_of("Huge"), Err(FleetError::UnknownUnit(_))));
    }
}
