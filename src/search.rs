//! Capped fuzzy search over the product catalog

use crate::fuzzy::fuzzy_matches;
use crate::models::Product;

/// Product search over a borrowed catalog slice.
///
/// No relevance ranking: results keep catalog order and are truncated to
/// the caller's limit.
pub struct ProductIndex<'a> {
    catalog: &'a [Product],
    min_query_length: usize,
}

impl<'a> ProductIndex<'a> {
    /// Create an index over a catalog
    #[must_use]
    pub fn new(catalog: &'a [Product], min_query_length: usize) -> Self {
        Self {
            catalog,
            min_query_length,
        }
    }

    /// Return up to `limit` products whose name or any synonym fuzzy-matches
    /// the query. Queries shorter than the configured minimum yield an
    /// empty result rather than an error.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&'a Product> {
        let query = query.trim();
        if query.chars().count() < self.min_query_length {
            return Vec::new();
        }

        self.catalog
            .iter()
            .filter(|product| {
                fuzzy_matches(&product.name, query)
                    || product
                        .synonyms
                        .iter()
                        .any(|synonym| fuzzy_matches(synonym, query))
            })
            .take(limit)
            .collect()
    }
}
