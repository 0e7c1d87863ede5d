//! Attribute storage for tags.
//!
//! This module provides [`AttributeMap`], a wrapper around [`IndexMap`] keyed by
//! [`AttributeKey`] (namespace + name). Lookups go through the index; anything
//! observable about ordering goes through the canonical order instead.
//!
//! ## Canonical Order
//!
//! Attributes are unordered as far as SDL is concerned: `a=1 b=2` and
//! `b=2 a=1` describe the same tag. So:
//!
//! - **Equality** ignores insertion order
//! - **Iteration** via [`AttributeMap::iter`] is sorted by namespace, then name
//! - **Serialization** uses that same sorted order, so output is deterministic
//!
//! ## Examples
//!
//! ```rust
//! use sdlang::{AttributeMap, Value};
//!
//! let mut a = AttributeMap::new();
//! a.insert("", "foo", Value::from("bar"));
//! a.insert("", "john", Value::from("doe"));
//!
//! let mut b = AttributeMap::new();
//! b.insert("", "john", Value::from("doe"));
//! b.insert("", "foo", Value::from("bar"));
//!
//! assert_eq!(a, b);
//! ```

use crate::Value;
use indexmap::{Equivalent, IndexMap};
use std::fmt;

/// The unique key of an attribute: its namespace (empty for none) and name.
///
/// Ordering is lexicographic by namespace, then by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey {
    pub namespace: String,
    pub name: String,
}

impl AttributeKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        AttributeKey {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for AttributeKey {
    /// `name` or `namespace:name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

/// Borrowed form of [`AttributeKey`]; hashes identically so it can be used
/// for lookups without allocating.
#[derive(Hash)]
struct KeyRef<'a> {
    namespace: &'a str,
    name: &'a str,
}

impl Equivalent<AttributeKey> for KeyRef<'_> {
    fn equivalent(&self, key: &AttributeKey) -> bool {
        self.namespace == key.namespace && self.name == key.name
    }
}

/// Namespaced attributes of a single tag.
///
/// Setting an existing key overwrites its value in place.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap(IndexMap<AttributeKey, Value>);

impl AttributeMap {
    /// Creates an empty `AttributeMap`.
    #[must_use]
    pub fn new() -> Self {
        AttributeMap(IndexMap::new())
    }

    /// Inserts an attribute, returning the previous value under that key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{AttributeMap, Value};
    ///
    /// let mut map = AttributeMap::new();
    /// assert!(map.insert("", "size", Value::from(5)).is_none());
    /// assert_eq!(map.insert("", "size", Value::from(6)), Some(Value::from(5)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.0.insert(AttributeKey::new(namespace, name), value)
    }

    /// Returns the value stored under `namespace:name`.
    #[must_use]
    pub fn get(&self, namespace: &str, name: &str) -> Option<&Value> {
        self.0.get(&KeyRef { namespace, name })
    }

    /// Returns a mutable reference to the value stored under `namespace:name`.
    pub fn get_mut(&mut self, namespace: &str, name: &str) -> Option<&mut Value> {
        self.0.get_mut(&KeyRef { namespace, name })
    }

    #[must_use]
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.get(namespace, name).is_some()
    }

    /// Removes an attribute, returning its value if it was present.
    pub fn remove(&mut self, namespace: &str, name: &str) -> Option<Value> {
        self.0.shift_remove(&KeyRef { namespace, name })
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in canonical order: by namespace, then by name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{AttributeMap, Value};
    ///
    /// let mut map = AttributeMap::new();
    /// map.insert("", "zeta", Value::Null);
    /// map.insert("private", "alpha", Value::Null);
    /// map.insert("", "alpha", Value::Null);
    ///
    /// let keys: Vec<String> = map.iter().map(|(k, _)| k.to_string()).collect();
    /// assert_eq!(keys, vec!["alpha", "zeta", "private:alpha"]);
    /// ```
    pub fn iter(&self) -> std::vec::IntoIter<(&AttributeKey, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Iterates in the order attributes were first inserted.
    pub fn iter_insertion_order(&self) -> indexmap::map::Iter<'_, AttributeKey, Value> {
        self.0.iter()
    }

    /// Attributes whose namespace is `namespace`, in canonical order.
    ///
    /// The result borrows only from the map, not from `namespace`.
    pub fn in_namespace(&self, namespace: &str) -> Vec<(&AttributeKey, &Value)> {
        self.iter().filter(|(k, _)| k.namespace == namespace).collect()
    }
}

impl PartialEq for AttributeMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .all(|(k, v)| other.get(&k.namespace, &k.name) == Some(v))
    }
}

impl IntoIterator for AttributeMap {
    type Item = (AttributeKey, Value);
    type IntoIter = indexmap::map::IntoIter<AttributeKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(AttributeKey, Value)> for AttributeMap {
    /// Later duplicates overwrite earlier ones.
    fn from_iter<T: IntoIterator<Item = (AttributeKey, Value)>>(iter: T) -> Self {
        AttributeMap(IndexMap::from_iter(iter))
    }
}
