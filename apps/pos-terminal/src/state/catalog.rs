//! Read-only catalog state.
//!
//! Validated once at startup; no lock needed.

use std::sync::Arc;

use ibstock_core::Catalog;

use crate::error::ApiError;
use crate::fixtures;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// The built-in store catalog.
    pub fn seeded() -> Result<Self, ApiError> {
        Ok(Self::new(fixtures::seed_catalog()?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
