//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits, loads catalogs and wires up services.

pub mod catalog;
pub mod di;
pub mod error;
pub mod traits;

pub use catalog::CatalogLoader;
pub use error::{InfraError, InfraResult};
