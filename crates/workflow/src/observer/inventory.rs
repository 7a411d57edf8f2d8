//! Stock keeping on order confirmation.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use common::OrderId;
use domain::{Order, OrderStatus, ProductCatalog};

use super::OrderObserver;
use crate::error::{Result, WorkflowError};

/// Takes ordered units out of stock the first time an order is confirmed.
///
/// Each order ID is processed at most once, so confirming again after an
/// undo leaves stock untouched.
#[derive(Debug)]
pub struct InventoryManagementService {
    catalog: ProductCatalog,
    processed_orders: RwLock<HashSet<OrderId>>,
}

impl InventoryManagementService {
    /// Creates a service decrementing stock in `catalog`.
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog,
            processed_orders: RwLock::new(HashSet::new()),
        }
    }

    /// Returns true if stock has already been taken for this order.
    pub fn has_processed(&self, order_id: &OrderId) -> bool {
        self.processed_orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(order_id)
    }

    /// Returns the number of orders stock has been taken for.
    pub fn processed_count(&self) -> usize {
        self.processed_orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl OrderObserver for InventoryManagementService {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn update(&self, order: &Order) -> Result<()> {
        if order.status() != OrderStatus::Confirmed {
            return Ok(());
        }

        let mut processed = self
            .processed_orders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if processed.contains(order.id()) {
            tracing::debug!(order_id = %order.id(), "stock already taken for order");
            return Ok(());
        }

        tracing::info!(order_id = %order.id(), "updating stock for order");
        let levels = self
            .catalog
            .take_items(order.items())
            .map_err(|source| WorkflowError::Observer {
                observer: self.name(),
                source,
            })?;

        for (item, stock) in order.items().iter().zip(levels) {
            metrics::counter!("inventory_units_decremented_total")
                .increment(u64::from(item.quantity));
            tracing::info!(
                product_id = %item.product_id,
                product = %item.product_name,
                stock,
                "product stock updated"
            );
        }

        processed.insert(order.id().clone());
        Ok(())
    }
}
