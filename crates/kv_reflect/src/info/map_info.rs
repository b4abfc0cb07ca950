use core::any::Any;
use core::fmt;

use crate::info::Type;

// -----------------------------------------------------------------------------
// ElementType

/// The declared type of a map key or value.
///
/// `Any` is used when the map type does not expose typed key/value
/// parameters. Elements declared as `Any` are serialized together with their
/// runtime type path so they can be restored without outside knowledge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Typed(Type),
    Any,
}

impl ElementType {
    /// Creates `ElementType::Typed` for `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        ElementType::Typed(Type::of::<T>())
    }

    /// Returns the concrete type, or `None` for `Any`.
    #[inline]
    pub const fn ty(&self) -> Option<Type> {
        match self {
            ElementType::Typed(ty) => Some(*ty),
            ElementType::Any => None,
        }
    }

    #[inline]
    pub const fn is_any(&self) -> bool {
        matches!(self, ElementType::Any)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Typed(ty) => f.write_str(ty.path()),
            ElementType::Any => f.write_str("<any>"),
        }
    }
}

// -----------------------------------------------------------------------------
// MapTypes

/// The key and value element types of a map type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapTypes {
    pub key: ElementType,
    pub value: ElementType,
}

impl MapTypes {
    /// Both elements untyped.
    pub const ANY: MapTypes = MapTypes {
        key: ElementType::Any,
        value: ElementType::Any,
    };

    /// Creates the element types `K` and `V`.
    #[inline]
    pub fn of<K: Any, V: Any>() -> Self {
        Self {
            key: ElementType::of::<K>(),
            value: ElementType::of::<V>(),
        }
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type information of a map-like type.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use kv_reflect::info::{ElementType, Typed};
///
/// let info = <BTreeMap<String, i32> as Typed>::type_info();
/// let types = info.as_map().unwrap().types();
///
/// assert_eq!(types.key, ElementType::of::<String>());
/// assert_eq!(types.value, ElementType::of::<i32>());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    types: MapTypes,
}

impl MapInfo {
    /// Creates the info of map type `M` with keys `K` and values `V`.
    #[inline]
    pub fn new<M: Any, K: Any, V: Any>() -> Self {
        Self {
            ty: Type::of::<M>(),
            types: MapTypes::of::<K, V>(),
        }
    }

    /// Creates the info of a map type whose elements are only known at runtime.
    #[inline]
    pub fn untyped<M: Any>() -> Self {
        Self {
            ty: Type::of::<M>(),
            types: MapTypes::ANY,
        }
    }

    /// Returns the map's own [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the key/value element types.
    #[inline]
    pub const fn types(&self) -> MapTypes {
        self.types
    }

    /// Returns the key element type.
    #[inline]
    pub const fn key(&self) -> ElementType {
        self.types.key
    }

    /// Returns the value element type.
    #[inline]
    pub const fn value(&self) -> ElementType {
        self.types.value
    }
}
