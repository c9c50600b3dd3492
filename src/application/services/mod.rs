//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services hold an immutable catalog and never mutate it.

mod analysis;

pub use analysis::{AnalysisService, QueryResult};
