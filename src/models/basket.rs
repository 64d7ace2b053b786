//! Basket item model

use chrono::{DateTime, Utc};

use super::Product;

/// A single line in the shopping basket.
///
/// There is at most one `BasketItem` per distinct product id; adding the
/// same product again increments `quantity` instead of duplicating.
/// Persistence uses its own trimmed-down shape, so this type stays off
/// the wire.
#[derive(Debug, Clone)]
pub struct BasketItem {
    /// Derived from the product id and creation timestamp
    pub id: String,
    pub product: Product,
    /// Always >= 1; dropping to 0 removes the item
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl BasketItem {
    /// Create a new basket line for a product, quantity 1
    #[must_use]
    pub fn new(product: Product, added_at: DateTime<Utc>) -> Self {
        let id = format!("{}-{}", product.id, added_at.timestamp_millis());
        Self {
            id,
            product,
            quantity: 1,
            added_at,
        }
    }

    /// Line total: quantity x unit price
    #[must_use]
    pub fn line_price(&self) -> f64 {
        f64::from(self.quantity) * self.product.price
    }
}
