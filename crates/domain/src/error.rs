//! Domain error types.

use common::ProductId;
use thiserror::Error;

use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the order entity.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Product is not present in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}
