//! Shared types for the order workflow engine.

pub mod types;

pub use types::{OrderId, ProductId};
