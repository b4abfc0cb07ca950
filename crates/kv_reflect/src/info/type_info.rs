use core::any::Any;
use core::fmt;

use crate::info::{MapInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The "kind" of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Map,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => f.pad("Map"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type information of a type whose structure is not reflected.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: Any>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information of a reflected type.
#[derive(Clone, Debug)]
pub enum TypeInfo {
    Map(MapInfo),
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// Returns the described [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Map(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the [`ReflectKind`].
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Map(_) => ReflectKind::Map,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    #[inline]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&MapInfo> {
        match self {
            Self::Map(info) => Some(info),
            Self::Opaque(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
pub trait Typed: Any {
    /// Returns the compiled type information of this type.
    fn type_info() -> TypeInfo;
}
