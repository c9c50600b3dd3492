//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod allocation;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod rules;

pub use allocation::try_allocate;
pub use catalog::Catalog;
pub use entities::*;
pub use error::DomainError;
pub use rules::{can_place, is_comfortable};
