//! Reference data: the enclosure and species catalogs.

use std::collections::HashSet;

use crate::domain::{Biome, DomainError, Enclosure, Species, SpeciesRecord};

/// Ordered enclosures and species the engine works against.
///
/// A catalog is read-only reference data. Queries work on clones of its
/// enclosures, never on the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    enclosures: Vec<Enclosure>,
    species: Vec<SpeciesRecord>,
}

impl Catalog {
    /// Build a catalog, enforcing the reference data invariants.
    pub fn new(enclosures: Vec<Enclosure>, species: Vec<SpeciesRecord>) -> Result<Self, DomainError> {
        let catalog = Self {
            enclosures,
            species,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The zoo as it stands today.
    pub fn default_zoo() -> Self {
        let enclosures = vec![
            Enclosure::empty(1, Biome::Savana, 10).with_occupants(Species::Macaco, 3, 1),
            Enclosure::empty(2, Biome::Floresta, 5),
            Enclosure::empty(3, Biome::SavanaERio, 7).with_occupants(Species::Gazela, 1, 2),
            Enclosure::empty(4, Biome::Rio, 8),
            Enclosure::empty(5, Biome::Savana, 9).with_occupants(Species::Leao, 1, 3),
        ];
        let species = vec![
            SpeciesRecord::new(1, Species::Leao, 3, &[Biome::Savana]),
            SpeciesRecord::new(2, Species::Leopardo, 2, &[Biome::Savana]),
            SpeciesRecord::new(3, Species::Crocodilo, 3, &[Biome::Rio]),
            SpeciesRecord::new(4, Species::Macaco, 1, &[Biome::Savana, Biome::Floresta]),
            SpeciesRecord::new(5, Species::Gazela, 2, &[Biome::Savana]),
            SpeciesRecord::new(6, Species::Hipopotamo, 4, &[Biome::Savana, Biome::Rio]),
        ];
        Self {
            enclosures,
            species,
        }
    }

    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    pub fn species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    /// Case-insensitive species lookup. Unknown names and known species
    /// missing from this catalog both yield `None`.
    pub fn find_species(&self, name: &str) -> Option<&SpeciesRecord> {
        let species: Species = name.parse().ok()?;
        self.species.iter().find(|r| r.species == species)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut ids = HashSet::new();
        for enclosure in &self.enclosures {
            if !ids.insert(enclosure.id) {
                return Err(DomainError::DuplicateEnclosure(enclosure.id));
            }
            if enclosure.occupied > enclosure.total {
                return Err(DomainError::OverCapacity {
                    id: enclosure.id,
                    occupied: enclosure.occupied,
                    total: enclosure.total,
                });
            }
            if let Some((species, _)) = enclosure.occupants.iter().find(|(_, n)| **n == 0) {
                return Err(DomainError::EmptyOccupancy {
                    id: enclosure.id,
                    species: species.to_string(),
                });
            }
            self.check_occupancy(enclosure)?;
        }

        let mut seen = HashSet::new();
        for record in &self.species {
            let name = record.species.to_string();
            if !seen.insert(record.species) {
                return Err(DomainError::DuplicateSpecies(name));
            }
            if record.size == 0 {
                return Err(DomainError::InvalidSize(name));
            }
            if record.biomes.is_empty() {
                return Err(DomainError::NoBiomes(name));
            }
        }
        Ok(())
    }

    /// `occupied` is zero exactly when nobody lives there, and covers at least
    /// the listed occupants. Species without a record count one unit each.
    fn check_occupancy(&self, enclosure: &Enclosure) -> Result<(), DomainError> {
        let mismatch = |expected: String| DomainError::OccupancyMismatch {
            id: enclosure.id,
            occupied: enclosure.occupied,
            expected,
        };

        if enclosure.is_empty() {
            return match enclosure.occupied {
                0 => Ok(()),
                _ => Err(mismatch("0 for an enclosure without occupants".into())),
            };
        }

        let minimum: u64 = enclosure
            .occupants
            .iter()
            .map(|(species, count)| {
                let size = self
                    .species
                    .iter()
                    .find(|r| r.species == *species)
                    .map_or(1, |r| r.size);
                u64::from(*count) * u64::from(size)
            })
            .sum();
        if u64::from(enclosure.occupied) < minimum {
            return Err(mismatch(format!("at least {minimum}")));
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_zoo()
    }
}
