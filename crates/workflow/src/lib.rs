//! Order workflow engine.
//!
//! This crate drives orders through their lifecycle:
//! - [`OrderObserver`] subscribers notified through an [`OrderSubject`]
//! - undoable [`OrderCommand`] transitions run by a [`CommandInvoker`]
//! - an [`OrderBook`] owning the orders commands refer to by ID
//! - [`OrderProcessingService`] composing all of the above with discounts

pub mod command;
pub mod config;
pub mod error;
pub mod invoker;
pub mod observer;
pub mod order_book;
pub mod service;

pub use command::{
    CancelOrderCommand, ConfirmOrderCommand, DeliverOrderCommand, OrderCommand, ShipOrderCommand,
};
pub use config::WorkflowConfig;
pub use error::{Result, WorkflowError};
pub use invoker::CommandInvoker;
pub use observer::{
    AnalyticsRecord, AnalyticsService, EmailMessage, EmailNotificationService,
    InventoryManagementService, OrderObserver, OrderSubject,
};
pub use order_book::OrderBook;
pub use service::{OrderProcessingService, WorkflowReport};
