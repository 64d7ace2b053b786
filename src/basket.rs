//! Shopping basket with synchronous key-value persistence
//!
//! The basket holds at most one line per product id. Every mutation is
//! written through to the injected [`KeyValueStore`] before it returns,
//! so the persisted copy always matches the in-memory state. Derived
//! views (totals, aisle ordering) are recomputed on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CartPilotError;
use crate::models::{BasketItem, Product};
use crate::storage::KeyValueStore;
use crate::Result;

/// Fixed storage key for the serialized basket
pub const BASKET_STORAGE_KEY: &str = "cartpilot:basket";

/// On-disk shape of one basket line. Timestamps are millis since epoch
/// so the round-trip is exact at millisecond precision.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedItem {
    #[serde(rename = "productId")]
    product_id: String,
    quantity: u32,
    #[serde(rename = "addedAt")]
    added_at: i64,
}

/// The user's in-progress shopping list
pub struct Basket {
    items: Vec<BasketItem>,
    storage: Box<dyn KeyValueStore>,
}

impl Basket {
    /// Open a basket, rehydrating any previously persisted items.
    ///
    /// Unreadable or malformed stored data is logged and discarded; the
    /// basket starts empty rather than failing the caller. Persisted
    /// product ids no longer present in the catalog are skipped.
    #[must_use]
    pub fn open(storage: Box<dyn KeyValueStore>, catalog: &[Product]) -> Self {
        let items = match storage.get(BASKET_STORAGE_KEY) {
            Ok(Some(raw)) => rehydrate(&raw, catalog),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read persisted basket, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { items, storage }
    }

    /// Add one of `product`. Adding a product already in the basket
    /// increments its quantity instead of creating a second line.
    pub fn add(&mut self, product: &Product) -> Result<()> {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity += 1;
            debug!("Incremented {} to quantity {}", product.id, item.quantity);
        } else {
            self.items.push(BasketItem::new(product.clone(), Utc::now()));
            debug!("Added {} to basket", product.id);
        }
        self.persist()
    }

    /// Set the quantity for a product. A quantity of 0 removes the line.
    /// Unknown product ids are a no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove(product_id);
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            item.quantity = quantity;
            self.persist()
        } else {
            Ok(())
        }
    }

    /// Remove a product's line entirely
    pub fn remove(&mut self, product_id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Empty the basket
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.storage.remove(BASKET_STORAGE_KEY)
    }

    /// Lines in insertion order
    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of quantity x unit price across all lines
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(BasketItem::line_price).sum()
    }

    /// Lines stable-sorted ascending by aisle; insertion order breaks ties
    #[must_use]
    pub fn sorted_by_aisle(&self) -> Vec<&BasketItem> {
        let mut sorted: Vec<&BasketItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.product.aisle);
        sorted
    }

    fn persist(&self) -> Result<()> {
        let persisted: Vec<PersistedItem> = self
            .items
            .iter()
            .map(|item| PersistedItem {
                product_id: item.product.id.clone(),
                quantity: item.quantity,
                added_at: item.added_at.timestamp_millis(),
            })
            .collect();

        let json = serde_json::to_string(&persisted)
            .map_err(|e| CartPilotError::persistence(format!("serialize: {e}")))?;
        self.storage.put(BASKET_STORAGE_KEY, &json)
    }
}

/// Rebuild basket lines from a persisted payload. Any parse failure
/// resets to empty; this is recovery, not an error.
fn rehydrate(raw: &str, catalog: &[Product]) -> Vec<BasketItem> {
    let persisted: Vec<PersistedItem> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Persisted basket is corrupt, starting empty: {}", e);
            return Vec::new();
        }
    };

    persisted
        .into_iter()
        .filter_map(|entry| {
            let Some(product) = catalog.iter().find(|p| p.id == entry.product_id) else {
                warn!(
                    "Skipping basket entry for unknown product {}",
                    entry.product_id
                );
                return None;
            };
            let Some(added_at) = DateTime::from_timestamp_millis(entry.added_at) else {
                warn!("Skipping basket entry with bad timestamp {}", entry.added_at);
                return None;
            };
            if entry.quantity == 0 {
                return None;
            }
            let mut item = BasketItem::new(product.clone(), added_at);
            item.quantity = entry.quantity;
            Some(item)
        })
        .collect()
}
