//! Product model for grocery catalog entries

use serde::{Deserialize, Serialize};

/// Physical placement of a product inside the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductLocation {
    pub aisle: u32,
    pub section: String,
}

/// A grocery product from the static catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category and alternative names used by the fuzzy matcher
    /// ("dairy", "semi skimmed", ...)
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Aisle number, 1-based
    pub aisle: u32,
    /// Unit price in pounds
    pub price: f64,
    pub location: Option<ProductLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_without_synonyms() {
        let json = r#"{"id":"p1","name":"Milk","aisle":5,"price":1.25,"location":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.synonyms.is_empty());
        assert_eq!(product.aisle, 5);
    }
}
