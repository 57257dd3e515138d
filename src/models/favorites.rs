//! Favorites set model.
//!
//! A plain set of slugs with no ordering semantics. Persists as a JSON
//! string array, the same shape the original key-value store used.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The set of favorited item slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(HashSet<String>);

impl Favorites {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `slug` is currently a favorite.
    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    /// Flip membership of `slug`. Returns the new membership state.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if self.0.remove(slug) {
            false
        } else {
            self.0.insert(slug.to_string());
            true
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the favorited slugs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Favorites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_should_flip_membership() {
        let mut favorites = Favorites::new();

        assert!(favorites.toggle("25"));
        assert!(favorites.contains("25"));

        assert!(!favorites.toggle("25"));
        assert!(!favorites.contains("25"));
    }

    #[test]
    fn toggle_twice_should_round_trip() {
        let mut favorites = Favorites::new();
        favorites.toggle("7");

        let before = favorites.clone();
        favorites.toggle("25");
        favorites.toggle("25");
        assert_eq!(favorites, before);
    }

    #[test]
    fn clear_should_empty_the_set() {
        let mut favorites: Favorites =
            ["1".to_string(), "2".to_string()].into_iter().collect();
        assert_eq!(favorites.len(), 2);

        favorites.clear();
        assert!(favorites.is_empty());
    }

    #[test]
    fn favorites_should_serialize_as_string_array() {
        let mut favorites = Favorites::new();
        favorites.toggle("25");

        let encoded = serde_json::to_string(&favorites).unwrap();
        assert_eq!(encoded, r#"["25"]"#);

        let decoded: Favorites = serde_json::from_str(r#"["1", "25", "25"]"#).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(decoded.contains("1"));
    }
}
