//! Domain layer for the order workflow engine.
//!
//! This crate provides the core domain abstractions including:
//! - Order entity with its status machine and line items
//! - Product catalog owning stock levels
//! - Discount strategies and the context that applies them

pub mod catalog;
pub mod discount;
pub mod error;
pub mod order;

pub use catalog::ProductCatalog;
pub use common::{OrderId, ProductId};
pub use discount::{
    DiscountContext, DiscountStrategy, FixedAmountDiscount, NoDiscount, PercentageDiscount,
};
pub use error::DomainError;
pub use order::{Money, Order, OrderError, OrderItem, OrderStatus, Product};
