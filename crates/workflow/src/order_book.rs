//! Order table owning every order of a workflow.

use std::collections::HashMap;

use common::OrderId;
use domain::Order;

use crate::error::{Result, WorkflowError};

/// Single owner of the orders a workflow drives.
///
/// Commands refer to orders by [`OrderId`] and borrow them from the book
/// only for the duration of a transition.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    /// Creates an empty order book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an order, replacing any order with the same ID, and returns its ID.
    pub fn insert(&mut self, order: Order) -> OrderId {
        let order_id = order.id().clone();
        self.orders.insert(order_id.clone(), order);
        order_id
    }

    /// Returns the order with the given ID.
    pub fn get(&self, order_id: &OrderId) -> Result<&Order> {
        self.orders
            .get(order_id)
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.clone()))
    }

    /// Returns the order with the given ID for mutation.
    pub fn get_mut(&mut self, order_id: &OrderId) -> Result<&mut Order> {
        self.orders
            .get_mut(order_id)
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.clone()))
    }

    /// Returns true if the book holds an order with this ID.
    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    /// Returns the number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the book holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::OrderStatus;

    #[test]
    fn test_insert_and_get() {
        let mut book = OrderBook::new();
        let order_id = book.insert(Order::new("ORD001", vec![], OrderStatus::Pending));

        assert_eq!(order_id.as_str(), "ORD001");
        assert!(book.contains(&order_id));
        assert_eq!(book.get(&order_id).unwrap().status(), OrderStatus::Pending);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_missing_order_is_reported() {
        let mut book = OrderBook::new();
        let missing = OrderId::new("ORD404");

        assert!(book.is_empty());
        assert!(matches!(
            book.get(&missing),
            Err(WorkflowError::OrderNotFound(id)) if id == missing
        ));
        assert!(book.get_mut(&missing).is_err());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut book = OrderBook::new();
        book.insert(Order::new("ORD001", vec![], OrderStatus::Pending));
        book.insert(Order::new("ORD001", vec![], OrderStatus::Cancelled));

        assert_eq!(book.len(), 1);
        assert_eq!(
            book.get(&"ORD001".into()).unwrap().status(),
            OrderStatus::Cancelled
        );
    }
}
