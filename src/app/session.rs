use crate::adapters::{CatalogAdapter, FileCartStore};
use crate::core::{Cart, CartManager, ConfigProvider, FailureNotifier, Result};
#[cfg(feature = "cli")]
use crate::config::CartCommand;
#[cfg(feature = "cli")]
use crate::core::{CartOutcome, CartResult, CartStore, Catalog, UpdateProductAmount};
use std::fmt::Write;

pub type FileBackedCart<N> = CartManager<CatalogAdapter, FileCartStore, N>;

/// Builds the catalog and file store named by `config` and hydrates a manager
/// from the stored cart.
pub async fn open_cart<N: FailureNotifier>(
    config: &dyn ConfigProvider,
    notifier: N,
) -> Result<FileBackedCart<N>> {
    let catalog = CatalogAdapter::from_config(config)?;
    let store = FileCartStore::new(config.storage_path(), config.cart_key());
    tracing::debug!("Cart file: {}", store.blob_path().display());

    let manager = CartManager::hydrate(catalog, store, notifier)
        .await?
        .with_request_timeout(config.request_timeout());
    Ok(manager)
}

#[cfg(feature = "cli")]
pub async fn run_command<C, S, N>(
    manager: &mut CartManager<C, S, N>,
    command: &CartCommand,
) -> CartResult
where
    C: Catalog,
    S: CartStore,
    N: FailureNotifier,
{
    match command {
        CartCommand::Add { product_id } => manager.add(*product_id).await,
        CartCommand::Remove { product_id } => manager.remove(*product_id).await,
        CartCommand::SetAmount { product_id, amount } => {
            manager
                .set_amount(UpdateProductAmount {
                    product_id: *product_id,
                    amount: *amount,
                })
                .await
        }
        CartCommand::Show => Ok(CartOutcome::Ignored),
    }
}

/// One line per cart line, then a summary line.
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    for line in cart {
        let _ = writeln!(
            out,
            "#{:<6} {:>3} x {:<50} {:>10.2}",
            line.product.id, line.amount, line.product.title, line.product.price
        );
    }
    let _ = write!(
        out,
        "{} lines, {} units",
        cart.len(),
        cart.total_units()
    );
    out
}
