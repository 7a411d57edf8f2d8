//! Order entity.

use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{Money, OrderError, OrderItem, OrderStatus};

/// An order and its line items.
///
/// `total_amount` is only meaningful after [`Order::calculate_total`] has
/// run; it is not kept in sync automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    items: Vec<OrderItem>,
    status: OrderStatus,
    total_amount: Money,
}

impl Order {
    /// Creates an order with the given items and initial status.
    pub fn new(id: impl Into<OrderId>, items: Vec<OrderItem>, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            items,
            status,
            total_amount: Money::zero(),
        }
    }

    /// Recomputes the total from the current items, stores it and returns it.
    pub fn calculate_total(&mut self) -> Money {
        self.total_amount = self.items.iter().map(OrderItem::total_price).sum();
        self.total_amount
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the last computed total.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }
}

// Transition methods (return the status held before the transition)
impl Order {
    /// Confirms the order and recomputes its total. Accepted from any status.
    pub fn confirm(&mut self) -> OrderStatus {
        let previous = std::mem::replace(&mut self.status, OrderStatus::Confirmed);
        self.calculate_total();
        previous
    }

    /// Ships the order. Only a confirmed order can be shipped.
    pub fn ship(&mut self) -> Result<OrderStatus, OrderError> {
        if !self.status.can_ship() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "ship",
            });
        }
        Ok(std::mem::replace(&mut self.status, OrderStatus::Shipped))
    }

    /// Marks the order delivered. Only a shipped order can be delivered.
    pub fn deliver(&mut self) -> Result<OrderStatus, OrderError> {
        if !self.status.can_deliver() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "deliver",
            });
        }
        Ok(std::mem::replace(&mut self.status, OrderStatus::Delivered))
    }

    /// Cancels the order. Accepted from any status.
    pub fn cancel(&mut self) -> OrderStatus {
        std::mem::replace(&mut self.status, OrderStatus::Cancelled)
    }

    /// Puts the order back into `status` without any precondition check.
    pub fn restore(&mut self, status: OrderStatus) -> OrderStatus {
        std::mem::replace(&mut self.status, status)
    }
}
