use crate::core::outcome::{CartFailure, CartOutcome, CartResult, Operation};
use crate::domain::model::{Cart, CartLine, ProductId, UpdateProductAmount};
use crate::domain::ports::{CartStore, Catalog, FailureNotifier};
use crate::utils::error::{CartError, Result};
use std::future::Future;
use std::time::Duration;

/// Owns the cart and every transition of it.
///
/// Each mutation computes the next `Cart` from the current one, saves it, and
/// only then swaps it in. Failures leave the cart as it was, go to the
/// notifier as a fixed message, and come back to the caller as a
/// [`CartFailure`].
pub struct CartManager<C: Catalog, S: CartStore, N: FailureNotifier> {
    catalog: C,
    store: S,
    notifier: N,
    cart: Cart,
    request_timeout: Option<Duration>,
}

impl<C: Catalog, S: CartStore, N: FailureNotifier> CartManager<C, S, N> {
    /// Builds a manager whose cart is whatever the store holds, or empty.
    pub async fn hydrate(catalog: C, store: S, notifier: N) -> Result<Self> {
        let cart = store.load().await?.map(Cart::normalized).unwrap_or_default();
        tracing::debug!("Hydrated cart with {} lines", cart.len());

        Ok(Self {
            catalog,
            store,
            notifier,
            cart,
            request_timeout: None,
        })
    }

    /// Bounds every catalog read. An elapsed read fails like an unreachable
    /// catalog.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds one unit. An existing line goes through the stock-checked
    /// quantity path; a new line is appended with amount 1.
    pub async fn add(&mut self, product_id: ProductId) -> CartResult {
        if let Some(line) = self.cart.line(product_id) {
            let request = UpdateProductAmount {
                product_id,
                amount: i64::from(line.amount) + 1,
            };
            let result = self.apply_amount(request).await;
            return self.report(Operation::UpdateAmount, result);
        }

        let result = self.append_product(product_id).await;
        self.report(Operation::Add, result)
    }

    pub async fn remove(&mut self, product_id: ProductId) -> CartResult {
        let result = self.drop_line(product_id).await;
        self.report(Operation::Remove, result)
    }

    pub async fn set_amount(&mut self, request: UpdateProductAmount) -> CartResult {
        let result = self.apply_amount(request).await;
        self.report(Operation::UpdateAmount, result)
    }

    async fn append_product(&mut self, product_id: ProductId) -> CartResult {
        let product = bounded(
            self.request_timeout,
            "fetch_product",
            self.catalog.fetch_product(product_id),
        )
        .await
        .map_err(|e| {
            if e.is_not_found() {
                CartFailure::ProductNotFound { product_id }
            } else {
                CartFailure::CatalogUnavailable {
                    reason: e.to_string(),
                }
            }
        })?;

        if product.id != product_id {
            return Err(CartFailure::Unexpected {
                reason: format!(
                    "catalog answered product {} for id {}",
                    product.id, product_id
                ),
            });
        }

        let next = self.cart.with_line(CartLine::new(product));
        self.commit(next).await
    }

    async fn drop_line(&mut self, product_id: ProductId) -> CartResult {
        if !self.cart.contains(product_id) {
            return Err(CartFailure::LineNotFound { product_id });
        }

        let next = self.cart.without(product_id);
        self.commit(next).await
    }

    async fn apply_amount(&mut self, request: UpdateProductAmount) -> CartResult {
        let UpdateProductAmount { product_id, amount } = request;

        if amount <= 0 {
            tracing::debug!("Ignoring amount {} for product {}", amount, product_id);
            return Ok(CartOutcome::Ignored);
        }

        let stock = bounded(
            self.request_timeout,
            "fetch_stock",
            self.catalog.fetch_stock(product_id),
        )
        .await
        .map_err(|e| CartFailure::StockUnavailable {
            reason: e.to_string(),
        })?;

        if amount > i64::from(stock.amount) {
            return Err(CartFailure::InsufficientStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let amount = u32::try_from(amount).map_err(|_| CartFailure::Unexpected {
            reason: format!("amount {} out of range", amount),
        })?;

        match self.cart.with_amount(product_id, amount) {
            Some(next) => self.commit(next).await,
            None => {
                tracing::debug!("Product {} passed the stock check but is not in the cart", product_id);
                Ok(CartOutcome::Ignored)
            }
        }
    }

    async fn commit(&mut self, next: Cart) -> CartResult {
        self.store
            .save(&next)
            .await
            .map_err(|e| CartFailure::Persistence {
                reason: e.to_string(),
            })?;

        self.cart = next;
        Ok(CartOutcome::Applied)
    }

    fn report(&self, operation: Operation, result: CartResult) -> CartResult {
        match &result {
            Ok(CartOutcome::Applied) => {
                tracing::info!(
                    "{:?} applied, cart now has {} lines / {} units",
                    operation,
                    self.cart.len(),
                    self.cart.total_units()
                );
            }
            Ok(CartOutcome::Ignored) => {
                tracing::debug!("{:?} left the cart unchanged", operation);
            }
            Err(failure) => {
                if failure.is_business_rejection() {
                    tracing::warn!("{:?} rejected: {}", operation, failure);
                } else {
                    tracing::error!("{:?} failed: {}", operation, failure);
                }
                self.notifier.notify_failure(failure.user_message(operation));
            }
        }
        result
    }
}

async fn bounded<T, F>(limit: Option<Duration>, operation: &str, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| CartError::Timeout {
                operation: operation.to_string(),
                limit,
            })?,
        None => call.await,
    }
}
