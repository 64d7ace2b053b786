//! Great-circle distance between coordinates
//!
//! All distances in CartPilot are in miles. The catalog radius search,
//! config defaults, and CLI output all use the same unit.

use haversine::{Location as HaversineLocation, Units, distance};

use crate::models::Coordinates;

/// Haversine distance between two points, in miles, rounded to one
/// decimal place.
///
/// Always finite and non-negative for finite inputs. NaN or infinite
/// coordinates are not validated here; callers must reject them upstream.
#[must_use]
pub fn distance_miles(from: Coordinates, to: Coordinates) -> f64 {
    let miles = distance(
        HaversineLocation {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        HaversineLocation {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        Units::Miles,
    );
    (miles * 10.0).round() / 10.0
}
