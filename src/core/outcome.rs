use crate::domain::model::ProductId;
use crate::utils::error::EXIT_OPERATION_FAILURE;
use thiserror::Error;

pub const ADD_FAILED: &str = "could not add product";
pub const REMOVE_FAILED: &str = "could not remove product";
pub const UPDATE_FAILED: &str = "could not update quantity";
pub const OUT_OF_STOCK: &str = "requested quantity exceeds available stock";

/// What a mutating call did to the cart when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// The cart changed and the new cart was persisted.
    Applied,
    /// Guarded no-op: the cart is exactly as before and nobody was notified.
    Ignored,
}

/// Why a mutating call left the cart untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartFailure {
    #[error("product {product_id} does not exist in the catalog")]
    ProductNotFound { product_id: ProductId },

    #[error("catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("product {product_id} is not in the cart")]
    LineNotFound { product_id: ProductId },

    #[error("stock unavailable: {reason}")]
    StockUnavailable { reason: String },

    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    #[error("cart could not be saved: {reason}")]
    Persistence { reason: String },

    #[error("unexpected failure: {reason}")]
    Unexpected { reason: String },
}

/// The user-facing operation a failure is reported under. Incrementing an
/// existing line through `add` reports as `UpdateAmount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartFailure {
    /// Fixed notification text. The cause is never part of it.
    pub fn user_message(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (CartFailure::InsufficientStock { .. }, _) => OUT_OF_STOCK,
            (_, Operation::Add) => ADD_FAILED,
            (_, Operation::Remove) => REMOVE_FAILED,
            (_, Operation::UpdateAmount) => UPDATE_FAILED,
        }
    }

    /// Expected business rejections, as opposed to faults of a collaborator.
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            CartFailure::InsufficientStock { .. }
                | CartFailure::LineNotFound { .. }
                | CartFailure::ProductNotFound { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_OPERATION_FAILURE
    }
}

pub type CartResult = std::result::Result<CartOutcome, CartFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_depend_on_operation_not_cause() {
        let not_found = CartFailure::ProductNotFound { product_id: 1 };
        let offline = CartFailure::CatalogUnavailable {
            reason: "connection refused".to_string(),
        };

        assert_eq!(not_found.user_message(Operation::Add), ADD_FAILED);
        assert_eq!(offline.user_message(Operation::Add), ADD_FAILED);
        assert_eq!(offline.user_message(Operation::UpdateAmount), UPDATE_FAILED);
        assert_eq!(
            CartFailure::LineNotFound { product_id: 1 }.user_message(Operation::Remove),
            REMOVE_FAILED
        );
    }

    #[test]
    fn test_insufficient_stock_has_its_own_message() {
        let failure = CartFailure::InsufficientStock {
            product_id: 5,
            requested: 3,
            available: 2,
        };

        assert_eq!(failure.user_message(Operation::UpdateAmount), OUT_OF_STOCK);
        assert!(failure.is_business_rejection());
        assert!(!CartFailure::Persistence {
            reason: "disk full".to_string()
        }
        .is_business_rejection());
        assert_eq!(failure.exit_code(), 2);
    }
}
