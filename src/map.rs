//! Key-ordered map type for LLSD maps.
//!
//! This module provides [`LlsdMap`], a wrapper around [`BTreeMap`] that keeps its keys
//! in ascending byte-wise order no matter how entries were inserted.
//!
//! ## Why BTreeMap?
//!
//! Both the binary and the JSON codec emit map members in ascending key order, so two
//! maps holding the same entries always encode to the same bytes. Keeping the map sorted
//! means neither encoder has to sort on the way out.
//!
//! ## Examples
//!
//! ```rust
//! use serde_llsd::{LlsdMap, Value};
//!
//! let mut map = LlsdMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["age", "name"]);
//! ```

use crate::Value;
use std::collections::{btree_map, BTreeMap, HashMap};

/// A map of string keys to LLSD values, iterated in ascending key order.
///
/// Keys are unique: inserting an existing key replaces its value.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{LlsdMap, Value};
///
/// let mut map = LlsdMap::new();
/// map.insert("second".to_string(), Value::from(2));
/// map.insert("first".to_string(), Value::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LlsdMap(BTreeMap<String, Value>);

impl LlsdMap {
    /// Creates an empty `LlsdMap`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::LlsdMap;
    ///
    /// let map = LlsdMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        LlsdMap(BTreeMap::new())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::{LlsdMap, Value};
    ///
    /// let mut map = LlsdMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert_eq!(map.insert("key".to_string(), Value::from(43)), Some(Value::from(42)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::{LlsdMap, Value};
    ///
    /// let mut map = LlsdMap::new();
    /// map.insert("count".to_string(), Value::from(1));
    /// if let Some(v) = map.get_mut("count") {
    ///     *v = Value::from(2);
    /// }
    /// assert_eq!(map.get("count"), Some(&Value::from(2)));
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Removes a key from the map, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` if the map contains a value for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in ascending order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in ascending key order.
    pub fn values(&self) -> btree_map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns a mutable iterator over the key-value pairs of the map.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }
}

impl From<BTreeMap<String, Value>> for LlsdMap {
    fn from(map: BTreeMap<String, Value>) -> Self {
        LlsdMap(map)
    }
}

impl From<HashMap<String, Value>> for LlsdMap {
    fn from(map: HashMap<String, Value>) -> Self {
        LlsdMap(map.into_iter().collect())
    }
}

impl From<LlsdMap> for BTreeMap<String, Value> {
    fn from(map: LlsdMap) -> Self {
        map.0
    }
}

impl IntoIterator for LlsdMap {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LlsdMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for LlsdMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        LlsdMap(BTreeMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_ignores_insertion_order() {
        let mut map = LlsdMap::new();
        for key in ["integer", "date", "binary"] {
            map.insert(key.to_string(), Value::Undefined);
        }

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["binary", "date", "integer"]);
    }

    #[test]
    fn test_order_is_bytewise() {
        let map: LlsdMap = ["b", "B", "a", "_"]
            .into_iter()
            .map(|k| (k.to_string(), Value::Undefined))
            .collect();

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B", "_", "a", "b"]);
    }

    #[test]
    fn test_remove_and_contains() {
        let mut map = LlsdMap::new();
        map.insert("a".to_string(), Value::from(1));
        assert!(map.contains_key("a"));
        assert_eq!(map.remove("a"), Some(Value::from(1)));
        assert!(!map.contains_key("a"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_from_hashmap() {
        let mut hash = HashMap::new();
        hash.insert("z".to_string(), Value::from(true));
        hash.insert("y".to_string(), Value::from(false));

        let map = LlsdMap::from(hash);
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["y", "z"]);
    }
}
