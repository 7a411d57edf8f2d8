//! Interchangeable discount policies.
//!
//! Every strategy recomputes the order total from its items before applying
//! its rule, so switching strategies never compounds discounts.

use crate::order::{Money, Order};

/// A pricing policy turning an order into the amount to charge.
pub trait DiscountStrategy: Send + Sync {
    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;

    /// Returns the discounted amount for `order`.
    ///
    /// Refreshes the order's stored total as a side effect; never changes
    /// its status.
    fn apply_discount(&self, order: &mut Order) -> Money;
}

/// Charges the full total.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountStrategy for NoDiscount {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply_discount(&self, order: &mut Order) -> Money {
        order.calculate_total()
    }
}

/// Takes a percentage off the total.
///
/// The percentage is not range-checked; values above 100 produce a negative
/// amount.
#[derive(Debug, Clone, Copy)]
pub struct PercentageDiscount {
    percentage: f64,
}

impl PercentageDiscount {
    /// Creates a strategy removing `percentage` percent.
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }

    /// Returns the configured percentage.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl DiscountStrategy for PercentageDiscount {
    fn name(&self) -> &'static str {
        "percentage"
    }

    fn apply_discount(&self, order: &mut Order) -> Money {
        order.calculate_total().less_percentage(self.percentage)
    }
}

/// Takes a fixed amount off the total, never going below zero.
#[derive(Debug, Clone, Copy)]
pub struct FixedAmountDiscount {
    amount: Money,
}

impl FixedAmountDiscount {
    /// Creates a strategy removing `amount`.
    pub fn new(amount: Money) -> Self {
        Self { amount }
    }

    /// Returns the configured amount.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl DiscountStrategy for FixedAmountDiscount {
    fn name(&self) -> &'static str {
        "fixed_amount"
    }

    fn apply_discount(&self, order: &mut Order) -> Money {
        order.calculate_total().saturating_sub(self.amount)
    }
}

/// Holds the active discount strategy.
///
/// Defaults to [`NoDiscount`]. Replacing the strategy affects the next
/// calculation only; no history is kept.
pub struct DiscountContext {
    strategy: Box<dyn DiscountStrategy>,
}

impl DiscountContext {
    /// Creates a context using `strategy`.
    pub fn new(strategy: Box<dyn DiscountStrategy>) -> Self {
        Self { strategy }
    }

    /// Replaces the active strategy.
    pub fn set_strategy(&mut self, strategy: Box<dyn DiscountStrategy>) {
        tracing::debug!(
            from = self.strategy.name(),
            to = strategy.name(),
            "switching discount strategy"
        );
        self.strategy = strategy;
    }

    /// Returns the name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Computes the amount to charge for `order` with the active strategy.
    pub fn calculate_final_amount(&self, order: &mut Order) -> Money {
        let amount = self.strategy.apply_discount(order);
        metrics::counter!("discounts_applied_total", "strategy" => self.strategy.name())
            .increment(1);
        tracing::debug!(
            order_id = %order.id(),
            strategy = self.strategy.name(),
            total = %order.total_amount(),
            final_amount = %amount,
            "discount applied"
        );
        amount
    }
}

impl Default for DiscountContext {
    fn default() -> Self {
        Self::new(Box::new(NoDiscount))
    }
}

impl std::fmt::Debug for DiscountContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountContext")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
