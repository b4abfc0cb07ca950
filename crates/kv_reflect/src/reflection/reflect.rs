use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use core::hash::BuildHasher;

use kv_utils::hash::{FixedHashState, FixedHasher};

use crate::info::Type;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait of the reflection system.
///
/// A `dyn Reflect` is a type-erased value that converters can inspect,
/// compare and downcast without knowing its concrete type.
///
/// # Implementing
///
/// Map types are covered by the crate. For other types use
/// [`impl_reflect_opaque!`](crate::impl_reflect_opaque).
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the box's type id.
/// Use [`ty_id`](Self::ty_id) instead:
///
/// ```
/// # use kv_reflect::Reflect;
/// # use core::any::TypeId;
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Reflect: Any + Send + Sync {
    /// Returns the type path of the underlying type.
    fn reflect_type_path(&self) -> &'static str;

    /// Casts this type to a reflected value.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts this type to a mutable reflected value.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Casts this type to a boxed reflected value.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Returns an immutable enumeration of "kinds" of type.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of "kinds" of type.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Compares with another reflected value.
    ///
    /// Returns `None` if comparison is not supported.
    fn reflect_eq(&self, other: &dyn Reflect) -> Option<bool>;

    /// Returns a hash of the value, or `None` if hashing is not supported.
    ///
    /// Equal values must produce equal hashes.
    fn reflect_hash(&self) -> Option<u64> {
        None
    }

    /// Debug formatter for the value.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

/// Returns the hasher used by [`Reflect::reflect_hash`] implementations.
#[inline]
pub fn reflect_hasher() -> FixedHasher {
    FixedHashState.build_hasher()
}

impl dyn Reflect {
    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        let any: &dyn Any = self;
        any.type_id()
    }

    /// Returns the [`Type`] of the underlying type.
    #[inline]
    pub fn reflect_ty(&self) -> Type {
        Type::from_parts(self.ty_id(), self.reflect_type_path())
    }

    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Downcasts the boxed value to type `T`.
    ///
    /// Returns the original box if the types do not match.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id checked before downcasting"),
        }
    }

    /// Downcasts the boxed value to type `T`, unboxing it.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use core::any::TypeId;

    use crate::Reflect;

    #[test]
    fn ty_id_sees_through_box() {
        let value: Box<dyn Reflect> = Box::new(String::from("a"));
        assert_eq!(value.ty_id(), TypeId::of::<String>());
        assert_eq!(value.reflect_ty().path(), "alloc::string::String");
    }

    #[test]
    fn take_returns_original_on_mismatch() {
        let value: Box<dyn Reflect> = Box::new(5_u8);
        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<u8>().unwrap(), 5);
    }

    #[test]
    fn debug_uses_reflect_debug() {
        let value: &dyn Reflect = &1.5_f32;
        assert_eq!(format!("{value:?}"), "1.5");
        assert_eq!(value.reflect_hash(), None);
        assert_eq!(value.reflect_eq(&1.5_f32), Some(true));
        assert_eq!(value.reflect_eq(&1.5_f64), Some(false));
    }
}
