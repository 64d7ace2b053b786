//! Bundled store and product catalogs, plus the nearby-store search
//!
//! Catalogs are static seed data embedded at compile time. Both are
//! ordered lists; product search and basket rehydration rely on that
//! insertion order staying stable.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::CartPilotError;
use crate::geo::distance_miles;
use crate::models::{Coordinates, Product, Store};
use crate::Result;

const STORES_JSON: &str = include_str!("../data/stores.json");
const PRODUCTS_JSON: &str = include_str!("../data/products.json");

/// Load the bundled supermarket catalog
pub fn bundled_stores() -> Result<Vec<Store>> {
    serde_json::from_str(STORES_JSON)
        .map_err(|e| CartPilotError::config(format!("bundled store catalog is invalid: {e}")))
}

/// Load the bundled product catalog
pub fn bundled_products() -> Result<Vec<Product>> {
    serde_json::from_str(PRODUCTS_JSON)
        .map_err(|e| CartPilotError::config(format!("bundled product catalog is invalid: {e}")))
}

/// Find stores within `radius_miles` of `origin`.
///
/// Each returned store carries its computed distance. Results are sorted
/// ascending by distance, ties broken by store id for determinism.
#[must_use]
pub fn find_nearby(stores: &[Store], origin: Coordinates, radius_miles: f64) -> Vec<Store> {
    let mut nearby: Vec<Store> = stores
        .iter()
        .filter_map(|store| {
            let miles = distance_miles(origin, store.coordinates);
            if miles <= radius_miles {
                let mut store = store.clone();
                store.distance = Some(miles);
                Some(store)
            } else {
                None
            }
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    debug!(
        "Found {} stores within {} miles of ({:.4}, {:.4})",
        nearby.len(),
        radius_miles,
        origin.latitude,
        origin.longitude
    );

    nearby
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANCHESTER_CENTRE: Coordinates = Coordinates {
        latitude: 53.4825,
        longitude: -2.2448,
    };

    #[test]
    fn test_bundled_catalogs_parse() {
        let stores = bundled_stores().unwrap();
        let products = bundled_products().unwrap();
        assert!(!stores.is_empty());
        assert!(!products.is_empty());
    }

    #[test]
    fn test_store_ids_are_unique() {
        let stores = bundled_stores().unwrap();
        let mut ids: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), stores.len());
    }

    #[test]
    fn test_product_aisles_and_prices_are_sane() {
        for product in bundled_products().unwrap() {
            assert!(product.aisle >= 1, "{} has aisle 0", product.id);
            assert!(product.price >= 0.0, "{} has negative price", product.id);
        }
    }

    #[test]
    fn test_nearby_arndale_within_one_mile() {
        let stores = bundled_stores().unwrap();
        let nearby = find_nearby(&stores, MANCHESTER_CENTRE, 1.0);

        assert!(
            nearby.iter().any(|s| s.id == "tesco-arndale"),
            "expected the Arndale Tesco in {nearby:?}"
        );
        // City-centre origin at 1 mile must exclude every London store
        assert!(nearby.iter().all(|s| !s.address.contains("London")));
        // Closest store is effectively at the origin
        assert_eq!(nearby[0].id, "tesco-arndale");
        assert_eq!(nearby[0].distance, Some(0.0));
    }

    #[test]
    fn test_nearby_sorted_and_within_radius() {
        let stores = bundled_stores().unwrap();
        let nearby = find_nearby(&stores, MANCHESTER_CENTRE, 50.0);

        let mut previous = 0.0;
        for store in &nearby {
            let miles = store.distance.expect("distance attached");
            assert!(miles <= 50.0);
            assert!(miles >= previous, "results not sorted ascending");
            previous = miles;
        }
    }

    #[test]
    fn test_nearby_ties_broken_by_store_id() {
        fn store_at(id: &str, coordinates: Coordinates) -> Store {
            Store {
                id: id.to_string(),
                name: format!("Store {id}"),
                chain: "Test".to_string(),
                address: "Test Street, Manchester".to_string(),
                postcode: "M1 1AD".to_string(),
                coordinates,
                phone: None,
                opening_hours: None,
                distance: None,
            }
        }

        // Same coordinates, so identical rounded distances; insertion
        // order deliberately descending by id
        let stores = vec![
            store_at("zeta", MANCHESTER_CENTRE),
            store_at("alpha", MANCHESTER_CENTRE),
            store_at("mid", MANCHESTER_CENTRE),
        ];

        let nearby = find_nearby(&stores, MANCHESTER_CENTRE, 1.0);
        let ids: Vec<&str> = nearby.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
        assert!(nearby.iter().all(|s| s.distance == Some(0.0)));
    }

    #[test]
    fn test_nearby_empty_when_radius_too_small() {
        let stores = bundled_stores().unwrap();
        // Middle of the North Sea
        let origin = Coordinates::new(56.0, 3.0);
        assert!(find_nearby(&stores, origin, 5.0).is_empty());
    }
}
