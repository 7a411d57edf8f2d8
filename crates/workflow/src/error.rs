//! Workflow error types.

use common::OrderId;
use domain::{DomainError, OrderError};
use thiserror::Error;

/// Errors that can occur while driving an order through its workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// An error occurred in the domain layer.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Detach was asked for an observer that is not attached.
    #[error("Observer not attached: {observer}")]
    ObserverNotFound { observer: &'static str },

    /// An observer failed while handling a notification.
    #[error("Observer '{observer}' failed: {source}")]
    Observer {
        observer: &'static str,
        #[source]
        source: DomainError,
    },

    /// No order with this ID is held by the order book.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A command was handed an order other than the one it was built for.
    #[error("Command targets order {expected} but was given order {actual}")]
    OrderMismatch { expected: OrderId, actual: OrderId },

    /// Undo was requested for a command that never ran.
    #[error("Command '{command}' has not been executed")]
    CommandNotExecuted { command: &'static str },
}

impl From<OrderError> for WorkflowError {
    fn from(e: OrderError) -> Self {
        WorkflowError::Domain(DomainError::Order(e))
    }
}

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
