// Adapters layer: concrete implementations of the domain ports.

pub mod file_store;
pub mod fixture_catalog;
pub mod http_catalog;
pub mod memory_store;
pub mod notifier;

use crate::domain::model::{Product, ProductId, Stock};
use crate::domain::ports::{Catalog, ConfigProvider};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;

pub use file_store::FileCartStore;
pub use fixture_catalog::FixtureCatalog;
pub use http_catalog::HttpCatalog;
pub use memory_store::MemoryCartStore;
pub use notifier::{ConsoleNotifier, RecordingNotifier};

/// The catalog picked by configuration: a fixture file when one is set,
/// otherwise the REST endpoint.
#[derive(Debug, Clone)]
pub enum CatalogAdapter {
    Http(HttpCatalog),
    Fixture(FixtureCatalog),
}

impl CatalogAdapter {
    pub fn from_config(config: &dyn ConfigProvider) -> Result<Self> {
        if let Some(fixture) = config.catalog_fixture() {
            tracing::info!("Using fixture catalog from {}", fixture);
            return Ok(Self::Fixture(FixtureCatalog::from_file(fixture)?));
        }

        let endpoint = config
            .catalog_endpoint()
            .ok_or_else(|| CartError::MissingConfigError {
                field: "catalog.endpoint".to_string(),
            })?;
        tracing::info!("Using catalog at {}", endpoint);
        Ok(Self::Http(HttpCatalog::with_timeout(
            endpoint,
            config.request_timeout(),
        )?))
    }
}

#[async_trait]
impl Catalog for CatalogAdapter {
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product> {
        match self {
            Self::Http(catalog) => catalog.fetch_product(product_id).await,
            Self::Fixture(catalog) => catalog.fetch_product(product_id).await,
        }
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock> {
        match self {
            Self::Http(catalog) => catalog.fetch_stock(product_id).await,
            Self::Fixture(catalog) => catalog.fetch_stock(product_id).await,
        }
    }
}
