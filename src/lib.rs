//! `CartPilot` - UK grocery shopping assistant core
//!
//! This library provides the core functionality for nearby store lookup,
//! fuzzy product search, basket management, and aisle-ordered shopping
//! routes.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod geo;
pub mod models;
pub mod postcode;
pub mod route;
pub mod search;
pub mod storage;

// Re-export core types for public API
pub use basket::{Basket, BASKET_STORAGE_KEY};
pub use catalog::{bundled_products, bundled_stores, find_nearby};
pub use config::CartPilotConfig;
pub use error::CartPilotError;
pub use fuzzy::fuzzy_matches;
pub use geo::distance_miles;
pub use models::{BasketItem, Coordinates, Product, Store};
pub use postcode::{is_valid_postcode, normalize_postcode, GeocodedPostcode, PostcodeClient};
pub use route::{plan_route, RouteStop};
pub use search::ProductIndex;
pub use storage::{FjallStore, KeyValueStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CartPilotError>;
