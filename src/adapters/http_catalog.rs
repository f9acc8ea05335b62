use crate::domain::model::{Product, ProductId, Stock};
use crate::domain::ports::Catalog;
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Catalog served over REST: `GET {endpoint}/products/{id}` and
/// `GET {endpoint}/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoint: String,
}

impl HttpCatalog {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn url(&self, collection: &str, id: ProductId) -> String {
        format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), collection, id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T> {
        let url = self.url(collection, id);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(CartError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(CartError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product> {
        self.get_json("products", "product", product_id).await
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock> {
        self.get_json("stock", "stock", product_id).await
    }
}
