// Static site catalogs: services and serviceable locations.
// Built once at startup and shared read-only through AppState.

pub mod locations;
pub mod services;

use thiserror::Error;
use tracing::info;

pub use locations::{LocationCatalog, LocationEntry};
pub use services::{ServiceCatalog, ServiceDocument};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate service slug '{0}' in catalog data")]
    DuplicateServiceSlug(String),

    #[error("Service at position {position} has an empty slug")]
    EmptyServiceSlug { position: usize },

    #[error("Malformed service catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Both catalogs, frozen after construction.
#[derive(Debug)]
pub struct SiteCatalog {
    pub services: ServiceCatalog,
    pub locations: LocationCatalog,
}

impl SiteCatalog {
    /// Loads the catalogs compiled into the binary. Fails on invalid service data.
    pub fn load() -> Result<Self, CatalogError> {
        let services = ServiceCatalog::embedded()?;
        let locations = LocationCatalog::embedded();
        info!(
            "Catalogs loaded: {} services, {} locations",
            services.len(),
            locations.len()
        );
        Ok(Self {
            services,
            locations,
        })
    }
}
