//! Order entity and related types.

mod entity;
mod state;
mod value_objects;

pub use entity::Order;
pub use state::OrderStatus;
pub use value_objects::{Money, OrderItem, Product};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },
}
