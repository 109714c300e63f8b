//! Raw form payload extraction.
//!
//! Browsers submit multi-select controls as repeated keys, which a plain
//! urlencoded deserializer cannot place on a struct field. Handlers
//! therefore extract the body as a list of key/value pairs and each form
//! type collects its fields from that list.

/// Builds a typed form from the raw urlencoded key/value pairs.
pub trait FromPairs {
    fn from_pairs(pairs: &[(String, String)]) -> Self;
}

/// First value submitted under `key`, or the empty string.
pub fn first(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

/// Every value submitted under `key`, in submission order.
pub fn all(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_returns_empty_for_missing_keys() {
        let body = pairs(&[("name", "Cases")]);
        assert_eq!(first(&body, "name"), "Cases");
        assert_eq!(first(&body, "summary"), "");
    }

    #[test]
    fn all_collects_repeated_keys_in_order() {
        let body = pairs(&[("category", "1"), ("name", "Socks"), ("category", "2")]);
        assert_eq!(all(&body, "category"), ["1", "2"]);
        assert!(all(&body, "anime").is_empty());
    }
}
