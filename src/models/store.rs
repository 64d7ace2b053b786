//! Store model for supermarket locations and coordinates

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A supermarket from the store catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub chain: String,
    pub address: String,
    pub postcode: String,
    pub coordinates: Coordinates,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    /// Distance from the search origin in miles, attached at query time.
    /// Not part of the catalog data and never persisted.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance: Option<f64>,
}
