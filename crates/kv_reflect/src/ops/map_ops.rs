use alloc::boxed::Box;
use core::fmt;

use kv_utils::hash::{HashTable, hash_table};
use thiserror::Error;

use crate::Reflect;
use crate::info::{MapInfo, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// MapInsertError

/// The failure of [`Map::try_insert`].
///
/// The rejected key and value are dropped.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapInsertError {
    /// The map already holds an equal key. The existing entry is kept.
    #[error("the map already contains an equal key")]
    Occupied,
    #[error("expected key of type `{expected}`, found `{found}`")]
    KeyMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected value of type `{expected}`, found `{found}`")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The key cannot be placed in a [`DynamicMap`].
    #[error("key of type `{type_path}` does not support reflect hashing and comparison")]
    Unhashable { type_path: &'static str },
}

// -----------------------------------------------------------------------------
// Map trait

/// A trait for type-erased map-like operations via reflection.
///
/// This trait represents any associative collection that maps keys to values,
/// such as `HashMap<K, V>`, `BTreeMap<K, V>` or [`DynamicMap`].
///
/// The iteration order is the map's own order and is not specified by
/// this trait.
///
/// # Examples
///
/// ```
/// use kv_reflect::{Reflect, ops::Map};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::<String, i32>::new();
/// let map_ref: &mut dyn Map = &mut map;
///
/// map_ref.try_insert(Box::new(String::from("a")), Box::new(1_i32)).unwrap();
/// assert!(map_ref.try_insert(Box::new(String::from("a")), Box::new(2_i32)).is_err());
///
/// assert_eq!(map_ref.len(), 1);
/// assert!(map_ref.contains_key(&String::from("a")));
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub trait Map: Reflect {
    /// Returns the number of key-value pairs in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the value associated with the given key.
    ///
    /// Returns `None` if the key is not present in the map or is of an
    /// incompatible type.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Returns `true` if the map holds a key equal to `key`.
    #[inline]
    fn contains_key(&self, key: &dyn Reflect) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the key-value pairs of the map.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Inserts a key-value pair if the key is not present yet.
    ///
    /// An existing entry is never replaced, the call fails with
    /// [`MapInsertError::Occupied`] instead.
    fn try_insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError>;
}

// -----------------------------------------------------------------------------
// Dynamic Map

/// A dynamic container representing a map-like collection.
///
/// Both keys and values are `Box<dyn Reflect>`, so a single `DynamicMap`
/// may hold elements of different types. Its [`MapInfo`] declares both
/// element types as [`ElementType::Any`], so converters record the runtime
/// type of each element alongside its data.
///
/// # Key Requirements
///
/// Keys must support [`Reflect::reflect_hash`] and [`Reflect::reflect_eq`].
/// Other keys are rejected with [`MapInsertError::Unhashable`].
///
/// # Examples
///
/// ```
/// use kv_reflect::ops::{Map, DynamicMap};
///
/// let mut map = DynamicMap::new();
/// map.insert(String::from("name"), String::from("Alice")).unwrap();
/// map.insert(7_u32, true).unwrap();
///
/// assert_eq!(map.len(), 2);
/// assert!(map.contains_key(&7_u32));
/// assert!(!map.contains_key(&7_i32));
/// ```
///
/// [`ElementType::Any`]: crate::info::ElementType::Any
#[derive(Default)]
pub struct DynamicMap {
    hash_table: HashTable<(Box<dyn Reflect>, Box<dyn Reflect>)>,
}

impl Typed for DynamicMap {
    fn type_info() -> TypeInfo {
        TypeInfo::Map(MapInfo::untyped::<Self>())
    }
}

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            hash_table: HashTable::new(),
        }
    }

    /// Creates a new empty `DynamicMap` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hash_table: HashTable::with_capacity(capacity),
        }
    }

    /// Inserts a boxed key-value pair, replacing and returning the old value.
    ///
    /// Returns `Err` with the pair if the key is not hashable.
    pub fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let Some(hash) = key.reflect_hash() else {
            return Err((key, value));
        };
        match self.hash_table.find_mut(hash, Self::internal_eq(&*key)) {
            Some((_, old)) => Ok(Some(core::mem::replace(old, value))),
            None => {
                self.insert_unique(hash, key, value);
                Ok(None)
            }
        }
    }

    /// Inserts a key-value pair, replacing and returning the old value.
    ///
    /// Fails with [`MapInsertError::Unhashable`] if the key is not hashable;
    /// nothing is inserted in that case.
    #[inline]
    pub fn insert<K: Reflect, V: Reflect>(
        &mut self,
        key: K,
        value: V,
    ) -> Result<Option<Box<dyn Reflect>>, MapInsertError> {
        self.insert_boxed(Box::new(key), Box::new(value))
            .map_err(|(key, _)| MapInsertError::Unhashable {
                type_path: key.reflect_type_path(),
            })
    }

    fn insert_unique(&mut self, hash: u64, key: Box<dyn Reflect>, value: Box<dyn Reflect>) {
        // Stored keys were hashable when inserted.
        self.hash_table.insert_unique(hash, (key, value), |(key, _)| {
            key.reflect_hash().unwrap_or_default()
        });
    }

    fn internal_eq(
        key: &dyn Reflect,
    ) -> impl FnMut(&(Box<dyn Reflect>, Box<dyn Reflect>)) -> bool + '_ {
        |(other, _)| key.reflect_eq(&**other) == Some(true)
    }
}

impl Reflect for DynamicMap {
    crate::reflection::impl_reflect_cast_fn!(Map);

    #[inline]
    fn reflect_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::map_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicMap(")?;
        crate::impls::map_debug(self, f)?;
        write!(f, ")")
    }
}

impl fmt::Debug for DynamicMap {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl Map for DynamicMap {
    #[inline]
    fn len(&self) -> usize {
        self.hash_table.len()
    }

    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        let hash = key.reflect_hash()?;
        self.hash_table
            .find(hash, Self::internal_eq(key))
            .map(|(_, value)| &**value)
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(self.hash_table.iter().map(|(k, v)| (&**k, &**v)))
    }

    fn try_insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError> {
        let Some(hash) = key.reflect_hash() else {
            return Err(MapInsertError::Unhashable {
                type_path: key.reflect_type_path(),
            });
        };
        if self
            .hash_table
            .find(hash, Self::internal_eq(&*key))
            .is_some()
        {
            return Err(MapInsertError::Occupied);
        }
        self.insert_unique(hash, key, value);
        Ok(())
    }
}

impl IntoIterator for DynamicMap {
    type Item = (Box<dyn Reflect>, Box<dyn Reflect>);
    type IntoIter = hash_table::IntoIter<Self::Item>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.hash_table.into_iter()
    }
}

impl<'a> IntoIterator for &'a DynamicMap {
    type Item = (&'a dyn Reflect, &'a dyn Reflect);
    type IntoIter = core::iter::Map<
        hash_table::Iter<'a, (Box<dyn Reflect>, Box<dyn Reflect>)>,
        fn(&'a (Box<dyn Reflect>, Box<dyn Reflect>)) -> Self::Item,
    >;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.hash_table.iter().map(|(k, v)| (&**k, &**v))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{DynamicMap, Map, MapInsertError};
    use crate::Reflect;

    #[test]
    fn try_insert_keeps_first_entry() {
        let mut map = DynamicMap::new();
        map.try_insert(Box::new(1_i32), Box::new(String::from("first")))
            .unwrap();

        let err = map
            .try_insert(Box::new(1_i32), Box::new(String::from("second")))
            .unwrap_err();
        assert_eq!(err, MapInsertError::Occupied);

        let value = map.get(&1_i32).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "first");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn keys_of_different_types_are_distinct() {
        let mut map = DynamicMap::new();
        map.insert(1_i32, ()).unwrap();
        map.insert(1_i64, ()).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn unhashable_keys_are_rejected() {
        let mut map = DynamicMap::new();
        let err = map.try_insert(Box::new(1.5_f64), Box::new(())).unwrap_err();
        assert!(matches!(err, MapInsertError::Unhashable { .. }));
        assert!(map.is_empty());
        assert!(map.get(&1.5_f64).is_none());
    }

    #[test]
    fn insert_reports_unhashable_keys() {
        let mut map = DynamicMap::new();
        let err = map.insert(1.5_f64, String::from("lost")).unwrap_err();
        assert_eq!(err, MapInsertError::Unhashable { type_path: "f64" });
        assert!(map.is_empty());

        assert!(map.insert(String::from("k"), 1.5_f64).unwrap().is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn reflect_eq_compares_entries() {
        let mut a = DynamicMap::new();
        a.insert(String::from("k"), 1_u8).unwrap();
        let mut b = DynamicMap::new();
        b.insert(String::from("k"), 1_u8).unwrap();
        assert_eq!(a.reflect_eq(&b), Some(true));

        let old = b.insert(String::from("k"), 2_u8).unwrap();
        assert_eq!(old.unwrap().downcast_ref::<u8>(), Some(&1));
        assert_eq!(a.reflect_eq(&b), Some(false));
    }
}
