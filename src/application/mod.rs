//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic over a catalog snapshot.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
