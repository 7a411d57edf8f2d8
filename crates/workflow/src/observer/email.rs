//! Customer email notifications.

use common::OrderId;
use domain::{Money, Order, OrderStatus};
use serde::Serialize;

use super::OrderObserver;
use crate::error::Result;

/// The email a customer receives for a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub subject: String,
    /// Extra line for confirmed and shipped orders.
    pub body: Option<String>,
}

/// Emails the customer on every status change.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailNotificationService;

impl EmailNotificationService {
    /// Creates a new email notification service.
    pub fn new() -> Self {
        Self
    }

    /// Builds the message for the order's current status.
    pub fn compose(&self, order: &Order) -> EmailMessage {
        let body = match order.status() {
            OrderStatus::Confirmed => Some(confirmation_line(order.total_amount())),
            OrderStatus::Shipped => Some("Your order has been shipped!".to_string()),
            _ => None,
        };

        EmailMessage {
            order_id: order.id().clone(),
            status: order.status(),
            subject: format!("Order {} status changed to {}", order.id(), order.status()),
            body,
        }
    }
}

fn confirmation_line(total: Money) -> String {
    format!("Order confirmed! Total: {total}")
}

impl OrderObserver for EmailNotificationService {
    fn name(&self) -> &'static str {
        "email"
    }

    fn update(&self, order: &Order) -> Result<()> {
        let message = self.compose(order);
        tracing::info!(
            order_id = %message.order_id,
            status = %message.status,
            subject = %message.subject,
            body = message.body.as_deref(),
            "email notification sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{OrderItem, Product};

    fn order(status: OrderStatus) -> Order {
        let product = Product::new("P001", "Laptop", Money::from_cents(99_999), 10);
        let mut order = Order::new("ORD001", vec![OrderItem::new(&product, 1)], status);
        order.calculate_total();
        order
    }

    #[test]
    fn test_confirmed_message_includes_total() {
        let message = EmailNotificationService.compose(&order(OrderStatus::Confirmed));
        assert_eq!(message.subject, "Order ORD001 status changed to confirmed");
        assert_eq!(message.body.as_deref(), Some("Order confirmed! Total: $999.99"));
    }

    #[test]
    fn test_shipped_message() {
        let message = EmailNotificationService.compose(&order(OrderStatus::Shipped));
        assert_eq!(message.body.as_deref(), Some("Your order has been shipped!"));
    }

    #[test]
    fn test_other_statuses_have_no_body() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let message = EmailNotificationService.compose(&order(status));
            assert_eq!(message.status, status);
            assert!(message.body.is_none());
        }
    }

    #[test]
    fn test_update_does_not_mutate_order() {
        let order = order(OrderStatus::Confirmed);
        let before = order.clone();
        EmailNotificationService.update(&order).unwrap();
        assert_eq!(order, before);
    }
}
