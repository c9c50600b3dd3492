//! Catalog files
//!
//! Reads and writes the TOML catalog format:
//!
//! ```toml
//! [[enclosures]]
//! id = 1
//! biome = "savana"
//! total = 10
//! occupied = 3
//! occupants = { MACACO = 3 }
//!
//! [[species]]
//! id = 1
//! name = "LEAO"
//! size = 3
//! biomes = ["savana"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{Biome, Catalog, DomainError, Enclosure, Species, SpeciesRecord};
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    enclosures: Vec<RawEnclosure>,
    #[serde(default)]
    species: Vec<RawSpecies>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnclosure {
    id: u32,
    biome: String,
    total: u32,
    #[serde(default)]
    occupied: u32,
    #[serde(default)]
    occupants: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSpecies {
    id: u32,
    name: String,
    size: u32,
    biomes: Vec<String>,
}

impl TryFrom<RawEnclosure> for Enclosure {
    type Error = DomainError;

    fn try_from(raw: RawEnclosure) -> Result<Self, Self::Error> {
        let mut occupants = BTreeMap::new();
        for (name, count) in raw.occupants {
            let species: Species = name.parse()?;
            if count == 0 {
                return Err(DomainError::EmptyOccupancy {
                    id: raw.id,
                    species: species.to_string(),
                });
            }
            *occupants.entry(species).or_insert(0) += count;
        }
        Ok(Enclosure {
            id: raw.id,
            biome: raw.biome.parse()?,
            total: raw.total,
            occupied: raw.occupied,
            occupants,
        })
    }
}

impl TryFrom<RawSpecies> for SpeciesRecord {
    type Error = DomainError;

    fn try_from(raw: RawSpecies) -> Result<Self, Self::Error> {
        let species: Species = raw.name.parse()?;
        let biomes = raw
            .biomes
            .iter()
            .map(|b| b.parse::<Biome>())
            .collect::<Result<_, _>>()?;
        Ok(SpeciesRecord {
            id: raw.id,
            species,
            size: raw.size,
            biomes,
        })
    }
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = DomainError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        let enclosures = raw
            .enclosures
            .into_iter()
            .map(Enclosure::try_from)
            .collect::<Result<_, _>>()?;
        let species = raw
            .species
            .into_iter()
            .map(SpeciesRecord::try_from)
            .collect::<Result<_, _>>()?;
        Catalog::new(enclosures, species)
    }
}

impl From<&Catalog> for RawCatalog {
    fn from(catalog: &Catalog) -> Self {
        Self {
            enclosures: catalog
                .enclosures()
                .iter()
                .map(|e| RawEnclosure {
                    id: e.id,
                    biome: e.biome.to_string(),
                    total: e.total,
                    occupied: e.occupied,
                    occupants: e
                        .occupants
                        .iter()
                        .map(|(s, n)| (s.to_string(), *n))
                        .collect(),
                })
                .collect(),
            species: catalog
                .species()
                .iter()
                .map(|r| RawSpecies {
                    id: r.id,
                    name: r.species.to_string(),
                    size: r.size,
                    biomes: r.biomes.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }
}

/// Loads catalogs from TOML files, falling back to the built-in zoo.
pub struct CatalogLoader {
    fs: Arc<dyn FileSystem>,
}

impl CatalogLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the catalog at `path`, or the built-in zoo when no path is given.
    pub fn load(&self, path: Option<&Path>) -> InfraResult<Catalog> {
        match path {
            Some(p) => self.load_file(p),
            None => {
                debug!("load: using built-in catalog");
                Ok(Catalog::default_zoo())
            }
        }
    }

    #[instrument(skip(self))]
    pub fn load_file(&self, path: &Path) -> InfraResult<Catalog> {
        if !self.fs.is_file(path) {
            return Err(InfraError::io(
                format!("catalog not found: {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a file"),
            ));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read catalog {}", path.display()), e))?;
        let catalog = Self::parse(&content, path)?;
        debug!(
            "load_file: {} enclosures, {} species",
            catalog.enclosures().len(),
            catalog.species().len()
        );
        Ok(catalog)
    }

    /// Parse catalog TOML. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> InfraResult<Catalog> {
        let raw: RawCatalog = toml::from_str(content).map_err(|e| InfraError::catalog(origin, e))?;
        Catalog::try_from(raw).map_err(|e| InfraError::catalog(origin, e))
    }

    /// Render a catalog in the same TOML format `parse` reads.
    pub fn render(catalog: &Catalog) -> InfraResult<String> {
        toml::to_string_pretty(&RawCatalog::from(catalog))
            .map_err(|e| InfraError::catalog("<render>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_lowercase_names_when_parsing_then_normalizes() {
        let toml = r#"
[[enclosures]]
id = 9
biome = "Savana e Rio"
total = 12
occupied = 4
occupants = { hipopotamo = 1 }

[[species]]
id = 1
name = "hipopotamo"
size = 4
biomes = ["savana", "rio", "savana e rio"]
"#;
        let catalog = CatalogLoader::parse(toml, Path::new("c.toml")).unwrap();
        let enclosure = &catalog.enclosures()[0];
        assert_eq!(enclosure.biome, Biome::SavanaERio);
        assert_eq!(enclosure.occupants.get(&Species::Hipopotamo), Some(&1));
        assert!(catalog.species()[0].lives_in(Biome::SavanaERio));
    }

    #[test]
    fn given_unknown_species_when_parsing_then_catalog_error() {
        let toml = r#"
[[species]]
id = 1
name = "UNICORNIO"
size = 1
biomes = ["floresta"]
"#;
        let err = CatalogLoader::parse(toml, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, InfraError::CatalogParse { .. }));
        assert!(err.to_string().contains("UNICORNIO"));
    }

    #[test]
    fn given_zero_occupant_count_when_parsing_then_errors() {
        let toml = r#"
[[enclosures]]
id = 2
biome = "rio"
total = 5
occupants = { CROCODILO = 0 }
"#;
        let err = CatalogLoader::parse(toml, Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("zero individuals"));
    }
}
