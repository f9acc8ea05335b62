use crate::domain::model::{Product, ProductId, Stock};
use crate::domain::ports::Catalog;
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// In-process catalog read from a `{"products": [..], "stock": [..]}` document,
/// the same layout a mock REST server serves from.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, Stock>,
}

impl FixtureCatalog {
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: stock.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: FixtureDocument = serde_json::from_str(content)?;
        tracing::debug!(
            "Loaded fixture catalog with {} products and {} stock entries",
            document.products.len(),
            document.stock.len()
        );
        Ok(Self::new(document.products, document.stock))
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or(CartError::NotFound {
                resource: "product",
                id: product_id,
            })
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock> {
        self.stock.get(&product_id).copied().ok_or(CartError::NotFound {
            resource: "stock",
            id: product_id,
        })
    }
}
