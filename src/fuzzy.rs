//! Permissive fuzzy matching for product search
//!
//! Two-stage match: contiguous substring first, then an ordered
//! subsequence walk as a fallback. The subsequence stage is deliberately
//! permissive ("mk" matches "Milk") so that short queries still surface
//! likely products.

/// Check whether `query` plausibly matches `candidate`, case-insensitive.
///
/// An empty query always matches.
#[must_use]
pub fn fuzzy_matches(candidate: &str, query: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();

    if candidate.contains(&query) {
        return true;
    }

    is_subsequence(&candidate, &query)
}

/// True if every character of `query` appears in `candidate` in order,
/// not necessarily contiguously.
fn is_subsequence(candidate: &str, query: &str) -> bool {
    let mut candidate_chars = candidate.chars();

    for query_char in query.chars() {
        loop {
            match candidate_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_query_always_matches() {
        assert!(fuzzy_matches("Cheddar Cheese", ""));
        assert!(fuzzy_matches("", ""));
    }

    #[rstest]
    #[case("Cheddar Cheese", "chee")]
    #[case("Cheddar Cheese", "CHEESE")]
    #[case("Semi Skimmed Milk", "milk")]
    fn test_substring_matches(#[case] candidate: &str, #[case] query: &str) {
        assert!(fuzzy_matches(candidate, query));
    }

    #[rstest]
    #[case("Milk", "mk")]
    #[case("Orange Juice", "oj")]
    #[case("Baked Beans", "bkdbns")]
    fn test_subsequence_matches(#[case] candidate: &str, #[case] query: &str) {
        assert!(fuzzy_matches(candidate, query));
    }

    #[rstest]
    #[case("Bread", "xyz")]
    #[case("Milk", "km")] // right letters, wrong order
    #[case("", "a")]
    fn test_non_matches(#[case] candidate: &str, #[case] query: &str) {
        assert!(!fuzzy_matches(candidate, query));
    }
}
