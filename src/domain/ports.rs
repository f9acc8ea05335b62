use crate::domain::model::{Cart, Product, ProductId, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read access to the remote catalog and inventory.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product>;
    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock>;
}

/// Durable home of the serialized cart. `save` replaces the whole value.
pub trait CartStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Cart>>> + Send;
    fn save(&self, cart: &Cart) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// One-way channel for telling the end user an operation did not apply.
pub trait FailureNotifier: Send + Sync {
    fn notify_failure(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> Option<&str>;
    fn catalog_fixture(&self) -> Option<&str>;
    fn storage_path(&self) -> &str;
    fn cart_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
