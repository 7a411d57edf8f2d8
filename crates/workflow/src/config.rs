//! Workflow configuration.

use domain::Money;
use serde::{Deserialize, Serialize};

/// Discount parameters used by
/// [`OrderProcessingService::process_order_workflow`](crate::OrderProcessingService::process_order_workflow).
///
/// Constructed explicitly and handed to the service; there is no global
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Percentage taken off by the percentage discount step.
    pub percentage_discount: f64,

    /// Amount taken off by the fixed discount step.
    pub fixed_discount: Money,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            percentage_discount: 10.0,
            fixed_discount: Money::from_dollars(50),
        }
    }
}
