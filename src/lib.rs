//! Zoo enclosure allocation.
//!
//! Given a species and a headcount, [`AnalysisService`](application::services::AnalysisService)
//! lists every enclosure of the [`Catalog`](domain::Catalog) that can house the whole
//! group under the biome, space and cohabitation rules.
//!
//! ```
//! use std::sync::Arc;
//! use recintos::application::services::AnalysisService;
//! use recintos::domain::Catalog;
//!
//! let service = AnalysisService::new(Arc::new(Catalog::default_zoo()));
//! let result = service.analyze("MACACO", 2);
//! assert_eq!(result.descriptors()[0], "Recinto 1 (espaço livre: 5 total: 10)");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
