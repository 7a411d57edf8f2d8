//! Product catalog owning stock levels.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use common::ProductId;

use crate::error::DomainError;
use crate::order::{OrderItem, Product};

/// Shared product table.
///
/// Cloning the catalog yields another handle onto the same products, so the
/// workflow and its inventory observer see the same stock levels.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with `products`.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id.clone(), product);
    }

    /// Returns the stored product with the same ID, inserting `product` first
    /// if none exists.
    pub fn get_or_insert(&self, product: Product) -> Product {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(product.id.clone())
            .or_insert(product)
            .clone()
    }

    /// Returns a snapshot of a product.
    pub fn get(&self, product_id: &ProductId) -> Option<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .cloned()
    }

    /// Returns the units on hand for a product.
    pub fn stock(&self, product_id: &ProductId) -> Option<i64> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(product_id)
            .map(|p| p.stock)
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes `quantity` units out of stock and returns the new level.
    ///
    /// Overselling is allowed: the level goes negative and a warning is logged.
    pub fn decrement_stock(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<i64, DomainError> {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let product = products
            .get_mut(product_id)
            .ok_or_else(|| DomainError::ProductNotFound(product_id.clone()))?;
        Ok(take(product, quantity))
    }

    /// Takes the ordered quantity of every item out of stock under one lock.
    ///
    /// Either every item is taken or, if any product is unknown, none is.
    /// Returns the new stock level per item, in item order.
    pub fn take_items(&self, items: &[OrderItem]) -> Result<Vec<i64>, DomainError> {
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(missing) = items.iter().find(|i| !products.contains_key(&i.product_id)) {
            return Err(DomainError::ProductNotFound(missing.product_id.clone()));
        }

        Ok(items
            .iter()
            .filter_map(|item| {
                products
                    .get_mut(&item.product_id)
                    .map(|product| take(product, item.quantity))
            })
            .collect())
    }
}

fn take(product: &mut Product, quantity: u32) -> i64 {
    product.stock -= i64::from(quantity);
    if product.stock < 0 {
        tracing::warn!(
            product_id = %product.id,
            requested = quantity,
            stock = product.stock,
            "product oversold"
        );
    }
    product.stock
}
