//! Aisle-ordered shopping route derived from the basket

use crate::basket::Basket;
use crate::models::BasketItem;

/// One stop on the shopping route: an aisle and the items to pick there
#[derive(Debug)]
pub struct RouteStop<'a> {
    pub aisle: u32,
    /// Section label from the first item with one, if any
    pub section: Option<&'a str>,
    /// Items in basket insertion order
    pub items: Vec<&'a BasketItem>,
}

/// Group basket items into stops ordered ascending by aisle.
///
/// Purely derived from the current basket contents; an empty basket
/// yields an empty route.
#[must_use]
pub fn plan_route(basket: &Basket) -> Vec<RouteStop<'_>> {
    let mut stops: Vec<RouteStop<'_>> = Vec::new();

    for item in basket.sorted_by_aisle() {
        let aisle = item.product.aisle;
        match stops.last_mut() {
            Some(stop) if stop.aisle == aisle => stop.items.push(item),
            _ => stops.push(RouteStop {
                aisle,
                section: None,
                items: vec![item],
            }),
        }
    }

    for stop in &mut stops {
        stop.section = stop
            .items
            .iter()
            .find_map(|item| item.product.location.as_ref())
            .map(|location| location.section.as_str());
    }

    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductLocation};
    use crate::storage::MemoryStore;

    fn product(id: &str, aisle: u32, section: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            synonyms: vec![],
            aisle,
            price: 1.0,
            location: section.map(|s| ProductLocation {
                aisle,
                section: s.to_string(),
            }),
        }
    }

    #[test]
    fn test_empty_basket_yields_empty_route() {
        let basket = Basket::open(Box::new(MemoryStore::new()), &[]);
        assert!(plan_route(&basket).is_empty());
    }

    #[test]
    fn test_route_groups_by_aisle_ascending() {
        let mut basket = Basket::open(Box::new(MemoryStore::new()), &[]);
        basket.add(&product("snacks", 9, Some("Snacks"))).unwrap();
        basket.add(&product("milk", 5, Some("Dairy"))).unwrap();
        basket.add(&product("cheese", 5, Some("Dairy"))).unwrap();
        basket.add(&product("bread", 1, Some("Bakery"))).unwrap();

        let route = plan_route(&basket);
        let aisles: Vec<u32> = route.iter().map(|stop| stop.aisle).collect();
        assert_eq!(aisles, vec![1, 5, 9]);

        let dairy = &route[1];
        assert_eq!(dairy.items.len(), 2);
        assert_eq!(dairy.items[0].product.id, "milk");
        assert_eq!(dairy.section, Some("Dairy"));
    }

    #[test]
    fn test_route_section_falls_back_to_none() {
        let mut basket = Basket::open(Box::new(MemoryStore::new()), &[]);
        basket.add(&product("loose", 3, None)).unwrap();

        let route = plan_route(&basket);
        assert_eq!(route.len(), 1);
        assert_eq!(route[0].section, None);
    }
}
