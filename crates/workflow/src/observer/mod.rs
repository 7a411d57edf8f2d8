//! Publish/subscribe delivery of order status changes.

mod analytics;
mod email;
mod inventory;

pub use analytics::{AnalyticsRecord, AnalyticsService};
pub use email::{EmailMessage, EmailNotificationService};
pub use inventory::InventoryManagementService;

use std::sync::Arc;

use domain::Order;

use crate::error::{Result, WorkflowError};

/// A subscriber reacting to every status change of an order.
pub trait OrderObserver: Send + Sync {
    /// Returns the name of this observer.
    fn name(&self) -> &'static str;

    /// Handles the order in its new status.
    fn update(&self, order: &Order) -> Result<()>;
}

/// Publisher owning the ordered list of attached observers.
///
/// Identity is the `Arc` allocation: attaching a clone of an already
/// attached `Arc` is a no-op.
#[derive(Default)]
pub struct OrderSubject {
    observers: Vec<Arc<dyn OrderObserver>>,
}

impl OrderSubject {
    /// Creates a subject with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an observer at the end of the delivery order.
    ///
    /// Returns false if this observer was already attached.
    pub fn attach(&mut self, observer: Arc<dyn OrderObserver>) -> bool {
        if self.is_attached(&observer) {
            return false;
        }
        tracing::debug!(observer = observer.name(), "observer attached");
        self.observers.push(observer);
        true
    }

    /// Detaches an observer.
    pub fn detach<O: OrderObserver + ?Sized>(&mut self, observer: &Arc<O>) -> Result<()> {
        let position = self
            .observers
            .iter()
            .position(|attached| same_observer(attached, observer))
            .ok_or(WorkflowError::ObserverNotFound {
                observer: observer.name(),
            })?;
        self.observers.remove(position);
        tracing::debug!(observer = observer.name(), "observer detached");
        Ok(())
    }

    /// Returns true if this observer is attached.
    pub fn is_attached<O: OrderObserver + ?Sized>(&self, observer: &Arc<O>) -> bool {
        self.observers
            .iter()
            .any(|attached| same_observer(attached, observer))
    }

    /// Returns the number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Delivers `order` to each observer in attachment order.
    ///
    /// Stops at the first failing observer; later observers are not called.
    pub fn notify_observers(&self, order: &Order) -> Result<()> {
        for observer in &self.observers {
            observer.update(order)?;
            metrics::counter!("order_notifications_delivered_total", "observer" => observer.name())
                .increment(1);
        }
        Ok(())
    }
}

impl std::fmt::Debug for OrderSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.observers.iter().map(|o| o.name()).collect();
        f.debug_struct("OrderSubject")
            .field("observers", &names)
            .finish()
    }
}

fn same_observer<O: OrderObserver + ?Sized>(
    attached: &Arc<dyn OrderObserver>,
    other: &Arc<O>,
) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(attached), Arc::as_ptr(other))
}
