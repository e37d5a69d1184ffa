//! Seed catalog of trains loaded at startup.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{error::CatalogError, models::TrainNumber};

static DEFAULT_CATALOG: Lazy<Vec<TrainSpec>> = Lazy::new(|| {
    vec![
        TrainSpec::new(101, "Express 101", "CityA", "CityB", 50),
        TrainSpec::new(202, "Superfast 202", "CityB", "CityC", 75),
    ]
});

/// Static description of a catalog train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Unique train number.
    pub number: TrainNumber,
    /// Display name.
    pub name: String,
    /// Departure station.
    pub source: String,
    /// Arrival station.
    pub destination: String,
    /// Number of seats, numbered from 1.
    pub capacity: u32,
}

impl TrainSpec {
    /// Convenience constructor used for the built-in catalog and tests.
    pub fn new(
        number: TrainNumber,
        name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            capacity,
        }
    }
}

/// The built-in catalog used when no configuration overrides it.
pub fn default_catalog() -> Vec<TrainSpec> {
    DEFAULT_CATALOG.clone()
}

/// Check that `specs` can seed a reservation manager.
pub fn validate(specs: &[TrainSpec]) -> Result<(), CatalogError> {
    if specs.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        if !seen.insert(spec.number) {
            return Err(CatalogError::DuplicateTrain(spec.number));
        }
        if spec.capacity == 0 {
            return Err(CatalogError::ZeroCapacity(spec.number));
        }
        if spec.name.trim().is_empty() {
            return Err(CatalogError::BlankName(spec.number));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].number, 101);
        assert_eq!(catalog[1].capacity, 75);
        assert_eq!(validate(&catalog), Ok(()));
    }

    #[test]
    fn rejects_broken_catalogs() {
        assert_eq!(validate(&[]), Err(CatalogError::Empty));

        let duplicate = vec![
            TrainSpec::new(7, "A", "X", "Y", 10),
            TrainSpec::new(7, "B", "Y", "Z", 10),
        ];
        assert_eq!(validate(&duplicate), Err(CatalogError::DuplicateTrain(7)));

        let empty_train = vec![TrainSpec::new(8, "Ghost", "X", "Y", 0)];
        assert_eq!(validate(&empty_train), Err(CatalogError::ZeroCapacity(8)));

        let unnamed = vec![TrainSpec::new(9, "  ", "X", "Y", 4)];
        assert_eq!(validate(&unnamed), Err(CatalogError::BlankName(9)));
    }
}
