use alloc::string::String;

use indexmap::IndexMap;
use kv_utils::hash::FixedHashState;

use super::Data;

// -----------------------------------------------------------------------------
// FieldMap

/// An insertion-ordered map from field names to [`Data`] nodes.
///
/// Backed by an [`IndexMap`], so lookups are hashed and iteration follows
/// insertion order. Names are case-sensitive.
///
/// # Examples
///
/// ```
/// use kv_reflect::data::{Data, FieldMap};
///
/// let mut map = FieldMap::new();
/// map.insert("b", Data::Bool(true));
/// map.insert("a", Data::Null);
/// map.insert("b", Data::Bool(false)); // overwrite keeps the position
///
/// let names: Vec<&str> = map.keys().collect();
/// assert_eq!(names, ["b", "a"]);
/// assert_eq!(map.get("b"), Some(&Data::Bool(false)));
/// ```
#[derive(Clone, Default)]
pub struct FieldMap {
    entries: IndexMap<String, Data, FixedHashState>,
}

impl FieldMap {
    /// Creates an empty `FieldMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: IndexMap::with_hasher(FixedHashState),
        }
    }

    /// Creates an empty `FieldMap` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Returns the node stored under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Data> {
        self.entries.get(name)
    }

    /// Returns a mutable reference to the node stored under `name`.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Data> {
        self.entries.get_mut(name)
    }

    /// Returns `true` if a field named `name` exists.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inserts a field, returning the previous node.
    ///
    /// An existing field is overwritten in place; a new one is appended.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: Data) -> Option<Data> {
        self.entries.insert(name.into(), value)
    }

    /// Removes a field, keeping the order of the remaining ones.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Data> {
        self.entries.shift_remove(name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the fields in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Data)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over the field names in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Two maps are equal when they hold the same fields in the same order.
impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl core::fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Data)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, Data)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = FieldMap::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Data);
    type IntoIter = indexmap::map::IntoIter<String, Data>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a str, &'a Data);
    type IntoIter = core::iter::Map<
        indexmap::map::Iter<'a, String, Data>,
        fn((&'a String, &'a Data)) -> (&'a str, &'a Data),
    >;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use super::FieldMap;
    use crate::data::{Data, Number};

    #[test]
    fn remove_keeps_order() {
        let mut map: FieldMap = [("a", Data::Null), ("b", Data::Bool(true)), ("c", Data::Null)]
            .into_iter()
            .collect();

        assert_eq!(map.remove("b"), Some(Data::Bool(true)));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut map = FieldMap::new();
        map.insert("Key", Data::Null);
        assert!(map.contains_key("Key"));
        assert!(!map.contains_key("key"));
    }

    #[test]
    fn wide_maps_keep_order_and_lookups() {
        const WIDTH: i64 = 20_000;

        let mut map = FieldMap::new();
        for i in 0..WIDTH {
            assert_eq!(map.insert(format!("f{i}"), Data::Number(Number::Int(i))), None);
        }
        assert_eq!(map.len(), WIDTH as usize);

        for i in (0..WIDTH).step_by(997) {
            assert_eq!(map.get(&format!("f{i}")), Some(&Data::Number(Number::Int(i))));
        }

        assert_eq!(map.remove("f0"), Some(Data::Number(Number::Int(0))));
        assert_eq!(map.keys().next(), Some("f1"));
        assert_eq!(map.keys().last(), Some("f19999"));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: FieldMap = [("a", Data::Null), ("b", Data::Null)].into_iter().collect();
        let ba: FieldMap = [("b", Data::Null), ("a", Data::Null)].into_iter().collect();

        assert_eq!(ab, ab.clone());
        assert_ne!(ab, ba);
    }
}
