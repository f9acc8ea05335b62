pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CartCommand, CliConfig};
pub use config::TomlConfig;

pub use adapters::{
    CatalogAdapter, ConsoleNotifier, FileCartStore, FixtureCatalog, HttpCatalog, MemoryCartStore,
    RecordingNotifier,
};
pub use crate::core::{
    Cart, CartFailure, CartLine, CartManager, CartOutcome, CartResult, Product, ProductId, Stock,
    UpdateProductAmount,
};
pub use utils::error::{CartError, Result};
