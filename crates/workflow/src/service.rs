//! Order processing service wiring observers, commands and discounts together.

use std::sync::Arc;

use common::OrderId;
use domain::{
    DiscountContext, FixedAmountDiscount, Money, Order, OrderItem, OrderStatus,
    PercentageDiscount, Product, ProductCatalog,
};
use serde::Serialize;

use crate::command::{
    CancelOrderCommand, ConfirmOrderCommand, DeliverOrderCommand, OrderCommand, ShipOrderCommand,
};
use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::invoker::CommandInvoker;
use crate::observer::{
    AnalyticsService, EmailNotificationService, InventoryManagementService, OrderObserver,
    OrderSubject,
};
use crate::order_book::OrderBook;

/// Outcome of [`OrderProcessingService::process_order_workflow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowReport {
    pub order_id: OrderId,
    pub original_total: Money,
    pub after_percentage_discount: Money,
    pub after_fixed_discount: Money,
    pub final_status: OrderStatus,
    /// Commands still available for undo when the workflow finished.
    pub undoable_commands: usize,
}

/// Service for driving orders through their lifecycle.
///
/// Owns the orders, the observer subject and the command history of one
/// workflow. Email, inventory and analytics observers are attached on
/// construction.
#[derive(Debug)]
pub struct OrderProcessingService {
    config: WorkflowConfig,
    catalog: ProductCatalog,
    orders: OrderBook,
    subject: OrderSubject,
    invoker: CommandInvoker,
}

impl OrderProcessingService {
    /// Creates a service over `catalog` with the standard observers attached.
    pub fn new(config: WorkflowConfig, catalog: ProductCatalog) -> Self {
        let mut subject = OrderSubject::new();
        subject.attach(Arc::new(EmailNotificationService::new()));
        subject.attach(Arc::new(InventoryManagementService::new(catalog.clone())));
        subject.attach(Arc::new(AnalyticsService::new()));

        Self {
            config,
            catalog,
            orders: OrderBook::new(),
            subject,
            invoker: CommandInvoker::new(),
        }
    }

    /// Creates a service with default discounts and the sample catalog.
    pub fn with_defaults() -> Self {
        Self::new(
            WorkflowConfig::default(),
            ProductCatalog::with_products(Self::create_sample_products()),
        )
    }

    /// Returns the workflow configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Returns the product catalog shared with the inventory observer.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Returns the order with the given ID.
    pub fn order(&self, order_id: &OrderId) -> Result<&Order> {
        self.orders.get(order_id)
    }

    /// Returns the number of commands that can be undone.
    pub fn history_len(&self) -> usize {
        self.invoker.history_len()
    }

    // Observers

    /// Attaches an additional observer. Returns false if already attached.
    pub fn attach(&mut self, observer: Arc<dyn OrderObserver>) -> bool {
        self.subject.attach(observer)
    }

    /// Detaches an observer.
    pub fn detach<O: OrderObserver + ?Sized>(&mut self, observer: &Arc<O>) -> Result<()> {
        self.subject.detach(observer)
    }

    /// Returns the number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }

    // Orders

    /// The sample products: a laptop, a mouse and a keyboard.
    pub fn create_sample_products() -> Vec<Product> {
        vec![
            Product::new("P001", "Laptop", Money::from_cents(99_999), 10),
            Product::new("P002", "Mouse", Money::from_cents(2_999), 50),
            Product::new("P003", "Keyboard", Money::from_cents(7_999), 30),
        ]
    }

    /// Creates the pending sample order `ORD001`: one laptop and two mice.
    ///
    /// Sample products missing from the catalog are added; existing stock is
    /// left as is.
    #[tracing::instrument(skip(self))]
    pub fn create_sample_order(&mut self) -> OrderId {
        let products: Vec<Product> = Self::create_sample_products()
            .into_iter()
            .map(|product| self.catalog.get_or_insert(product))
            .collect();
        let items = vec![
            OrderItem::new(&products[0], 1),
            OrderItem::new(&products[1], 2),
        ];
        self.add_order(Order::new("ORD001", items, OrderStatus::Pending))
    }

    /// Places a new pending order under a generated ID.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub fn place_order(&mut self, items: Vec<OrderItem>) -> OrderId {
        self.add_order(Order::new(OrderId::generate(), items, OrderStatus::Pending))
    }

    /// Hands an externally built order to the service.
    pub fn add_order(&mut self, order: Order) -> OrderId {
        tracing::info!(order_id = %order.id(), status = %order.status(), "order registered");
        self.orders.insert(order)
    }

    // Commands

    /// Confirms an order.
    #[tracing::instrument(skip(self))]
    pub fn confirm(&mut self, order_id: &OrderId) -> Result<()> {
        self.execute(Box::new(ConfirmOrderCommand::new(order_id.clone())))
    }

    /// Ships a confirmed order.
    #[tracing::instrument(skip(self))]
    pub fn ship(&mut self, order_id: &OrderId) -> Result<()> {
        self.execute(Box::new(ShipOrderCommand::new(order_id.clone())))
    }

    /// Marks a shipped order as delivered.
    #[tracing::instrument(skip(self))]
    pub fn deliver(&mut self, order_id: &OrderId) -> Result<()> {
        self.execute(Box::new(DeliverOrderCommand::new(order_id.clone())))
    }

    /// Cancels an order.
    #[tracing::instrument(skip(self))]
    pub fn cancel(&mut self, order_id: &OrderId) -> Result<()> {
        self.execute(Box::new(CancelOrderCommand::new(order_id.clone())))
    }

    /// Executes an arbitrary command through the invoker.
    pub fn execute(&mut self, command: Box<dyn OrderCommand>) -> Result<()> {
        self.invoker
            .execute_command(command, &mut self.orders, &self.subject)
    }

    /// Undoes the most recent command, returning its name.
    #[tracing::instrument(skip(self))]
    pub fn undo_last(&mut self) -> Result<Option<&'static str>> {
        self.invoker.undo_last(&mut self.orders, &self.subject)
    }

    /// Runs the demonstration workflow for an order.
    ///
    /// Prices the order without discount, with the percentage discount and
    /// with the fixed discount (each from the item total), then confirms,
    /// ships and undoes the shipment. Any failure aborts the remaining steps.
    #[tracing::instrument(skip(self))]
    pub fn process_order_workflow(&mut self, order_id: &OrderId) -> Result<WorkflowReport> {
        tracing::info!("starting order processing");

        let (original_total, after_percentage_discount, after_fixed_discount) = {
            let order = self.orders.get_mut(order_id)?;
            let mut context = DiscountContext::default();

            let original = context.calculate_final_amount(order);
            tracing::info!(total = %original, "original total");

            context.set_strategy(Box::new(PercentageDiscount::new(
                self.config.percentage_discount,
            )));
            let after_percentage = context.calculate_final_amount(order);
            tracing::info!(
                percentage = self.config.percentage_discount,
                amount = %after_percentage,
                "after percentage discount"
            );

            context.set_strategy(Box::new(FixedAmountDiscount::new(
                self.config.fixed_discount,
            )));
            let after_fixed = context.calculate_final_amount(order);
            tracing::info!(
                discount = %self.config.fixed_discount,
                amount = %after_fixed,
                "after fixed discount"
            );

            (original, after_percentage, after_fixed)
        };

        tracing::info!("executing order commands");
        self.confirm(order_id)?;
        self.ship(order_id)?;

        tracing::info!("undoing last command");
        self.undo_last()?;

        let report = WorkflowReport {
            order_id: order_id.clone(),
            original_total,
            after_percentage_discount,
            after_fixed_discount,
            final_status: self.orders.get(order_id)?.status(),
            undoable_commands: self.invoker.history_len(),
        };
        tracing::info!(final_status = %report.final_status, "order processing finished");
        Ok(report)
    }
}
