//! Insertion-ordered string map used for global settings.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::resolve::{resolve, Variables};

/// A string-to-string map that iterates in insertion order.
///
/// Every key in `keys` has exactly one entry in `data` and vice versa.
/// Re-inserting an existing key replaces its value but keeps its original
/// position.
///
/// When decoded from JSON the order is the order of the source document:
///
/// ```rust
/// use detheme_core::OrderedMap;
///
/// let map: OrderedMap = serde_json::from_str(r#"{"b": "1", "a": "2", "c": "3"}"#).unwrap();
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMap {
    keys: Vec<String>,
    data: HashMap<String, String>,
}

impl OrderedMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.data.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.data.insert(key, value.into());
    }

    /// Returns the raw, unresolved value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Returns the value for `key` run through the resolver.
    ///
    /// Not cached: each call resolves the raw value again.
    pub fn resolved(&self, key: &str, variables: &Variables) -> Option<String> {
        self.get(key).map(|raw| resolve(raw, variables))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// `(key, raw value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .filter_map(|k| self.data.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'de> Deserialize<'de> for OrderedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OrderedMapVisitor)
    }
}

struct OrderedMapVisitor;

impl<'de> Visitor<'de> for OrderedMapVisitor {
    type Value = OrderedMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of string values")
    }

    fn visit_unit<E>(self) -> Result<OrderedMap, E> {
        Ok(OrderedMap::new())
    }

    fn visit_map<A>(self, mut access: A) -> Result<OrderedMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::new();

        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            match value {
                serde_json::Value::String(s) => map.insert(key, s),
                serde_json::Value::Number(n) => map.insert(key, n.to_string()),
                serde_json::Value::Bool(b) => map.insert(key, b.to_string()),
                other => {
                    tracing::warn!(key = %key, value = %other, "skipping non-scalar global");
                }
            }
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut map = OrderedMap::new();
        map.insert("b", "1");
        map.insert("a", "2");
        map.insert("c", "3");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = OrderedMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            [("a", "3"), ("b", "2")]
        );
    }

    #[test]
    fn test_deserialize_preserves_source_order() {
        let map: OrderedMap =
            serde_json::from_str(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_deserialize_duplicate_key_last_value_wins() {
        let map: OrderedMap = serde_json::from_str(r#"{"a": "1", "b": "2", "a": "3"}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some("3"));
    }

    #[test]
    fn test_deserialize_scalars_and_skips_nested() {
        let map: OrderedMap = serde_json::from_str(
            r#"{"width": 2, "flag": true, "nested": {"x": "y"}, "none": null, "s": "v"}"#,
        )
        .unwrap();
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            [("width", "2"), ("flag", "true"), ("s", "v")]
        );
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let map: OrderedMap = serde_json::from_str("null").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<OrderedMap>(r#"["a", "b"]"#).is_err());
    }

    #[test]
    fn test_resolved_runs_resolver() {
        let map: OrderedMap = [("caret", "var(c)")].into_iter().collect();
        let mut vars = Variables::new();
        vars.insert("c".into(), "#fa0".into());
        assert_eq!(map.resolved("caret", &vars).as_deref(), Some("#ffaa00"));
        assert_eq!(map.resolved("missing", &vars), None);
    }
}
