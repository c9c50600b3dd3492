//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::AnalysisService;
use crate::config::Settings;
use crate::domain::Catalog;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::{CatalogLoader, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Reference data loaded once at startup
    pub catalog: Arc<Catalog>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let loader = CatalogLoader::new(fs);
        let catalog = Arc::new(loader.load(settings.catalog_path.as_deref())?);
        debug!(
            "ServiceContainer: catalog with {} enclosures",
            catalog.enclosures().len()
        );

        Ok(Self {
            settings: Arc::new(settings),
            catalog,
        })
    }

    /// Analysis service over the loaded catalog.
    pub fn analysis_service(&self) -> AnalysisService {
        AnalysisService::new(self.catalog.clone())
    }
}
