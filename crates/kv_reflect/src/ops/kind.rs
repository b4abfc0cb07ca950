use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::Map;

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of "kinds" of a reflected value.
///
/// Obtained from [`Reflect::reflect_ref`].
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Map(&'a dyn Map),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns the [`ReflectKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Map(_) => ReflectKind::Map,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the map view, or `None` if the value is not a map.
    #[inline]
    pub fn as_map(self) -> Option<&'a dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            Self::Opaque(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of "kinds" of a reflected value.
///
/// Obtained from [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Map(&'a mut dyn Map),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// Returns the [`ReflectKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Map(_) => ReflectKind::Map,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the mutable map view, or `None` if the value is not a map.
    #[inline]
    pub fn as_map(self) -> Option<&'a mut dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            Self::Opaque(_) => None,
        }
    }
}
