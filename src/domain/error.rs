//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule outcomes and catalog violations.
/// The first three are the query rejections reported back to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Quantidade inválida")]
    InvalidQuantity,

    #[error("Animal inválido")]
    InvalidAnimal,

    #[error("Não há recinto viável")]
    NoViableEnclosure,

    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    #[error("unknown biome: {0}")]
    UnknownBiome(String),

    #[error("duplicate enclosure id: {0}")]
    DuplicateEnclosure(u32),

    #[error("duplicate species in catalog: {0}")]
    DuplicateSpecies(String),

    #[error("enclosure {id} over capacity: occupied {occupied} > total {total}")]
    OverCapacity { id: u32, occupied: u32, total: u32 },

    #[error("enclosure {id} occupancy {occupied} does not match its occupants (expected {expected})")]
    OccupancyMismatch { id: u32, occupied: u32, expected: String },

    #[error("enclosure {id} lists {species} with zero individuals")]
    EmptyOccupancy { id: u32, species: String },

    #[error("species {0} must have a positive size")]
    InvalidSize(String),

    #[error("species {0} must live in at least one biome")]
    NoBiomes(String),
}

