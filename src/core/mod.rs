pub mod cart_manager;
pub mod outcome;

pub use crate::domain::model::{Cart, CartLine, Product, ProductId, Stock, UpdateProductAmount};
pub use crate::domain::ports::{CartStore, Catalog, ConfigProvider, FailureNotifier};
pub use crate::utils::error::Result;
pub use cart_manager::CartManager;
pub use outcome::{CartFailure, CartOutcome, CartResult, Operation};
