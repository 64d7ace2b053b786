//! Data models for the CartPilot core
//!
//! This module contains the core domain models organized by concern:
//! - Store: Supermarket locations and geographic coordinates
//! - Product: Catalog entries with aisle placement and pricing
//! - Basket: In-progress shopping list items

pub mod basket;
pub mod product;
pub mod store;

// Re-export all public types for convenient access
pub use basket::BasketItem;
pub use product::{Product, ProductLocation};
pub use store::{Coordinates, Store};
