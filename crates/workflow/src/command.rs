//! Undoable order status transitions.
//!
//! A command is built for one order and remembers the status the order held
//! right before it ran. Undo restores that status and notifies observers
//! again; it does not reverse what observers did in response to the
//! original transition.

use common::OrderId;
use domain::{Order, OrderStatus};

use crate::error::{Result, WorkflowError};
use crate::observer::OrderSubject;

/// An encapsulated, undoable status transition.
pub trait OrderCommand: Send + Sync {
    /// Returns the name of this command.
    fn name(&self) -> &'static str;

    /// Returns the ID of the order this command targets.
    fn order_id(&self) -> &OrderId;

    /// Applies the transition and notifies observers.
    fn execute(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()>;

    /// Restores the status held before [`execute`](Self::execute) and
    /// notifies observers.
    fn undo(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()>;
}

/// Confirms an order from any status and recomputes its total.
#[derive(Debug, Clone)]
pub struct ConfirmOrderCommand {
    order_id: OrderId,
    previous_status: Option<OrderStatus>,
}

impl ConfirmOrderCommand {
    /// Creates a new ConfirmOrderCommand.
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
            previous_status: None,
        }
    }
}

impl OrderCommand for ConfirmOrderCommand {
    fn name(&self) -> &'static str {
        "confirm"
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn execute(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        ensure_target(&self.order_id, order)?;
        self.previous_status = Some(order.confirm());
        subject.notify_observers(order)?;
        tracing::info!(order_id = %order.id(), total = %order.total_amount(), "order confirmed");
        Ok(())
    }

    fn undo(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        revert(self.name(), &self.order_id, self.previous_status, order, subject)
    }
}

/// Ships a confirmed order.
#[derive(Debug, Clone)]
pub struct ShipOrderCommand {
    order_id: OrderId,
    previous_status: Option<OrderStatus>,
}

impl ShipOrderCommand {
    /// Creates a new ShipOrderCommand.
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
            previous_status: None,
        }
    }
}

impl OrderCommand for ShipOrderCommand {
    fn name(&self) -> &'static str {
        "ship"
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn execute(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        ensure_target(&self.order_id, order)?;
        self.previous_status = Some(order.ship()?);
        subject.notify_observers(order)?;
        tracing::info!(order_id = %order.id(), "order shipped");
        Ok(())
    }

    fn undo(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        revert(self.name(), &self.order_id, self.previous_status, order, subject)
    }
}

/// Marks a shipped order as delivered.
#[derive(Debug, Clone)]
pub struct DeliverOrderCommand {
    order_id: OrderId,
    previous_status: Option<OrderStatus>,
}

impl DeliverOrderCommand {
    /// Creates a new DeliverOrderCommand.
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
            previous_status: None,
        }
    }
}

impl OrderCommand for DeliverOrderCommand {
    fn name(&self) -> &'static str {
        "deliver"
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn execute(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        ensure_target(&self.order_id, order)?;
        self.previous_status = Some(order.deliver()?);
        subject.notify_observers(order)?;
        tracing::info!(order_id = %order.id(), "order delivered");
        Ok(())
    }

    fn undo(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        revert(self.name(), &self.order_id, self.previous_status, order, subject)
    }
}

/// Cancels an order from any status.
#[derive(Debug, Clone)]
pub struct CancelOrderCommand {
    order_id: OrderId,
    previous_status: Option<OrderStatus>,
}

impl CancelOrderCommand {
    /// Creates a new CancelOrderCommand.
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
            previous_status: None,
        }
    }
}

impl OrderCommand for CancelOrderCommand {
    fn name(&self) -> &'static str {
        "cancel"
    }

    fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    fn execute(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        ensure_target(&self.order_id, order)?;
        self.previous_status = Some(order.cancel());
        subject.notify_observers(order)?;
        tracing::info!(order_id = %order.id(), "order cancelled");
        Ok(())
    }

    fn undo(&mut self, order: &mut Order, subject: &OrderSubject) -> Result<()> {
        revert(self.name(), &self.order_id, self.previous_status, order, subject)
    }
}

fn ensure_target(order_id: &OrderId, order: &Order) -> Result<()> {
    if order.id() != order_id {
        return Err(WorkflowError::OrderMismatch {
            expected: order_id.clone(),
            actual: order.id().clone(),
        });
    }
    Ok(())
}

fn revert(
    command: &'static str,
    order_id: &OrderId,
    previous_status: Option<OrderStatus>,
    order: &mut Order,
    subject: &OrderSubject,
) -> Result<()> {
    ensure_target(order_id, order)?;
    let previous_status = previous_status.ok_or(WorkflowError::CommandNotExecuted { command })?;
    order.restore(previous_status);
    subject.notify_observers(order)?;
    tracing::info!(order_id = %order.id(), status = %previous_status, command, "order reverted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::OrderObserver;
    use std::sync::{Arc, Mutex};

    /// Records the status of every order it is notified about.
    #[derive(Default)]
    struct StatusLog {
        seen: Mutex<Vec<OrderStatus>>,
    }

    impl StatusLog {
        fn seen(&self) -> Vec<OrderStatus> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl OrderObserver for StatusLog {
        fn name(&self) -> &'static str {
            "status_log"
        }

        fn update(&self, order: &Order) -> Result<()> {
            self.seen.lock().unwrap().push(order.status());
            Ok(())
        }
    }

    fn setup(status: OrderStatus) -> (Order, OrderSubject, Arc<StatusLog>) {
        let log = Arc::new(StatusLog::default());
        let mut subject = OrderSubject::new();
        subject.attach(log.clone());
        (Order::new("ORD001", vec![], status), subject, log)
    }

    #[test]
    fn test_confirm_notifies_once_with_confirmed_status() {
        let (mut order, subject, log) = setup(OrderStatus::Pending);
        let mut command = ConfirmOrderCommand::new("ORD001");

        command.execute(&mut order, &subject).unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(log.seen(), vec![OrderStatus::Confirmed]);
    }

    #[test]
    fn test_ship_from_pending_is_rejected_without_notification() {
        let (mut order, subject, log) = setup(OrderStatus::Pending);
        let mut command = ShipOrderCommand::new("ORD001");

        let err = command.execute(&mut order, &subject).unwrap_err();

        assert!(matches!(err, WorkflowError::Domain(_)));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(log.seen().is_empty());
    }

    #[test]
    fn test_undo_restores_previous_status_and_notifies() {
        let (mut order, subject, log) = setup(OrderStatus::Confirmed);
        let mut command = ShipOrderCommand::new("ORD001");

        command.execute(&mut order, &subject).unwrap();
        command.undo(&mut order, &subject).unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(
            log.seen(),
            vec![OrderStatus::Shipped, OrderStatus::Confirmed]
        );
    }

    #[test]
    fn test_cancel_from_any_status_and_undo() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            let (mut order, subject, _) = setup(status);
            let mut command = CancelOrderCommand::new("ORD001");

            command.execute(&mut order, &subject).unwrap();
            assert_eq!(order.status(), OrderStatus::Cancelled);

            command.undo(&mut order, &subject).unwrap();
            assert_eq!(order.status(), status);
        }
    }

    #[test]
    fn test_deliver_requires_shipped() {
        let (mut order, subject, _) = setup(OrderStatus::Confirmed);
        assert!(DeliverOrderCommand::new("ORD001")
            .execute(&mut order, &subject)
            .is_err());

        order.restore(OrderStatus::Shipped);
        DeliverOrderCommand::new("ORD001")
            .execute(&mut order, &subject)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_undo_before_execute_fails() {
        let (mut order, subject, log) = setup(OrderStatus::Pending);
        let mut command = ConfirmOrderCommand::new("ORD001");

        let err = command.undo(&mut order, &subject).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::CommandNotExecuted { command: "confirm" }
        ));
        assert!(log.seen().is_empty());
    }

    #[test]
    fn test_command_rejects_other_orders() {
        let (mut order, subject, _) = setup(OrderStatus::Pending);
        let mut command = ConfirmOrderCommand::new("ORD999");

        let err = command.execute(&mut order, &subject).unwrap_err();

        assert!(matches!(err, WorkflowError::OrderMismatch { .. }));
        assert_eq!(order.status(), OrderStatus::Pending);
    }
}
