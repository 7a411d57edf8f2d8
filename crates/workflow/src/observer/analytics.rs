//! Order analytics recording.

use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Money, Order, OrderStatus};
use serde::Serialize;

use super::OrderObserver;
use crate::error::Result;

/// One analytics data point for an order status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsRecord {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub total: Money,
    /// True once the order has been delivered.
    pub completed: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Records every status change for reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsService;

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new() -> Self {
        Self
    }

    /// Builds the data point for the order's current status.
    pub fn record(&self, order: &Order) -> AnalyticsRecord {
        AnalyticsRecord {
            order_id: order.id().clone(),
            status: order.status(),
            total: order.total_amount(),
            completed: order.status() == OrderStatus::Delivered,
            recorded_at: Utc::now(),
        }
    }
}

impl OrderObserver for AnalyticsService {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn update(&self, order: &Order) -> Result<()> {
        let record = self.record(order);
        tracing::info!(
            order_id = %record.order_id,
            status = %record.status,
            total = %record.total,
            recorded_at = %record.recorded_at,
            "order recorded"
        );
        if record.completed {
            tracing::info!(order_id = %record.order_id, "order completed successfully");
        }
        Ok(())
    }
}
