//! Domain entities: core data structures

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::DomainError;

/// Habitat label of an enclosure.
///
/// `SavanaERio` is a dual-habitat enclosure. It is a label of its own and is
/// never decomposed into `Savana` + `Rio` when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Biome {
    Savana,
    Floresta,
    Rio,
    SavanaERio,
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Savana, Biome::Floresta, Biome::Rio, Biome::SavanaERio];

    pub fn label(self) -> &'static str {
        match self {
            Biome::Savana => "savana",
            Biome::Floresta => "floresta",
            Biome::Rio => "rio",
            Biome::SavanaERio => "savana e rio",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Biome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Biome::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownBiome(s.to_string()))
    }
}

/// Animal species known to the zoo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Leao,
    Leopardo,
    Crocodilo,
    Macaco,
    Gazela,
    Hipopotamo,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Leao,
        Species::Leopardo,
        Species::Crocodilo,
        Species::Macaco,
        Species::Gazela,
        Species::Hipopotamo,
    ];

    /// Canonical uppercase name.
    pub fn name(self) -> &'static str {
        match self {
            Species::Leao => "LEAO",
            Species::Leopardo => "LEOPARDO",
            Species::Crocodilo => "CROCODILO",
            Species::Macaco => "MACACO",
            Species::Gazela => "GAZELA",
            Species::Hipopotamo => "HIPOPOTAMO",
        }
    }

    pub fn is_carnivore(self) -> bool {
        matches!(self, Species::Leao | Species::Leopardo | Species::Crocodilo)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Case-insensitive lookup by name.
impl FromStr for Species {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Species::ALL
            .into_iter()
            .find(|sp| sp.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownSpecies(s.to_string()))
    }
}

/// Catalog entry describing one species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesRecord {
    pub id: u32,
    pub species: Species,
    /// Space taken by one individual
    pub size: u32,
    /// Biomes the species can live in (never empty)
    pub biomes: BTreeSet<Biome>,
}

impl SpeciesRecord {
    pub fn new(id: u32, species: Species, size: u32, biomes: &[Biome]) -> Self {
        Self {
            id,
            species,
            size,
            biomes: biomes.iter().copied().collect(),
        }
    }

    pub fn lives_in(&self, biome: Biome) -> bool {
        self.biomes.contains(&biome)
    }
}

/// An enclosure and its current occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub id: u32,
    pub biome: Biome,
    /// Total capacity in space units
    pub total: u32,
    /// Space units already taken
    pub occupied: u32,
    /// Species name -> headcount (counts are always >= 1)
    pub occupants: BTreeMap<Species, u32>,
}

impl Enclosure {
    pub fn empty(id: u32, biome: Biome, total: u32) -> Self {
        Self {
            id,
            biome,
            total,
            occupied: 0,
            occupants: BTreeMap::new(),
        }
    }

    /// Builder-style helper for seeding occupants in catalogs and tests.
    pub fn with_occupants(mut self, species: Species, count: u32, size_each: u32) -> Self {
        *self.occupants.entry(species).or_insert(0) += count;
        self.occupied = self.occupied.saturating_add(count.saturating_mul(size_each));
        self
    }

    pub fn free_space(&self) -> u32 {
        self.total.saturating_sub(self.occupied)
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Record one more individual. Callers check capacity first; a record
    /// that would overflow the counter is refused and nothing changes.
    pub(crate) fn admit(&mut self, record: &SpeciesRecord) -> bool {
        let Some(occupied) = self.occupied.checked_add(record.size) else {
            return false;
        };
        self.occupied = occupied;
        *self.occupants.entry(record.species).or_insert(0) += 1;
        true
    }
}

/// Ephemeral group of identical individuals requested in one query.
///
/// Members are yielded on demand, so a large quantity costs no memory up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationGroup {
    record: SpeciesRecord,
    quantity: u32,
}

impl AllocationGroup {
    pub fn new(record: &SpeciesRecord, quantity: u32) -> Self {
        Self {
            record: record.clone(),
            quantity,
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &SpeciesRecord> {
        std::iter::repeat(&self.record).take(self.quantity as usize)
    }

    pub fn len(&self) -> usize {
        self.quantity as usize
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Least space the whole group occupies once placed, overhead excluded.
    pub fn min_space(&self) -> u64 {
        u64::from(self.record.size) * u64::from(self.quantity)
    }
}

/// An enclosure able to take the whole group, measured after placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViableEnclosure {
    pub id: u32,
    pub free_space: u32,
    pub total: u32,
}

impl From<&Enclosure> for ViableEnclosure {
    fn from(enclosure: &Enclosure) -> Self {
        Self {
            id: enclosure.id,
            free_space: enclosure.free_space(),
            total: enclosure.total,
        }
    }
}

impl fmt::Display for ViableEnclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recinto {} (espaço livre: {} total: {})",
            self.id, self.free_space, self.total
        )
    }
}

impl Serialize for ViableEnclosure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("LEAO", Species::Leao)]
    #[case("leao", Species::Leao)]
    #[case("  Macaco ", Species::Macaco)]
    #[case("hipopotamo", Species::Hipopotamo)]
    fn given_any_case_when_parsing_species_then_resolves(
        #[case] input: &str,
        #[case] expected: Species,
    ) {
        assert_eq!(input.parse::<Species>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_name_when_parsing_species_then_errors() {
        let err = "UNICORNIO".parse::<Species>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownSpecies(name) if name == "UNICORNIO"));
    }

    #[rstest]
    #[case("savana", Biome::Savana)]
    #[case("savana e rio", Biome::SavanaERio)]
    #[case("RIO", Biome::Rio)]
    fn given_label_when_parsing_biome_then_resolves(#[case] input: &str, #[case] expected: Biome) {
        assert_eq!(input.parse::<Biome>().unwrap(), expected);
    }

    #[test]
    fn given_partial_compound_label_when_parsing_biome_then_errors() {
        assert!("savana e".parse::<Biome>().is_err());
    }

    #[test]
    fn only_lion_leopard_and_crocodile_are_carnivores() {
        let carnivores: Vec<_> = Species::ALL.into_iter().filter(|s| s.is_carnivore()).collect();
        assert_eq!(
            carnivores,
            vec![Species::Leao, Species::Leopardo, Species::Crocodilo]
        );
    }

    #[test]
    fn given_viable_enclosure_when_displayed_then_uses_descriptor_format() {
        let viable = ViableEnclosure {
            id: 1,
            free_space: 5,
            total: 10,
        };
        assert_eq!(viable.to_string(), "Recinto 1 (espaço livre: 5 total: 10)");
    }

    #[test]
    fn given_group_when_built_then_holds_identical_copies() {
        let record = SpeciesRecord::new(4, Species::Macaco, 1, &[Biome::Savana, Biome::Floresta]);
        let group = AllocationGroup::new(&record, 3);
        assert_eq!(group.len(), 3);
        assert_eq!(group.members().count(), 3);
        assert!(group.members().all(|m| *m == record));
        assert_eq!(group.min_space(), 3);
    }
}
