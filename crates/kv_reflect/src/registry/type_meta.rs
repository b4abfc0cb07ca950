use alloc::boxed::Box;
use core::any::TypeId;
use core::ops::{Deref, DerefMut};

use kv_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for type metadata, registered into the [`TypeRegistry`].
///
/// This includes a [`TypeInfo`] and a [`TypeTrait`] table.
///
/// # Example
///
/// ```
/// # use kv_reflect::registry::{TypeMeta, TypeTraitDefault, FromType};
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
///
/// let f = meta.get_trait::<TypeTraitDefault>().unwrap();
/// let s = f.default().take::<String>().unwrap();
///
/// assert_eq!(s, "");
/// ```
pub struct TypeMeta {
    type_info: TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Create an empty [`TypeMeta`] from a type.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: TypeIdMap::new(),
        }
    }

    /// Create an empty [`TypeMeta`] from a type with capacity.
    #[inline]
    pub fn with_capacity<T: Typed>(capacity: usize) -> Self {
        Self {
            type_info: T::type_info(),
            trait_table: TypeIdMap::with_capacity(capacity),
        }
    }

    /// Returns the [`TypeInfo`].
    #[inline(always)]
    pub const fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        self.type_info.ty()
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Insert a new [`TypeTrait`], overwriting one of the same type.
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Removes a [`TypeTrait`] from the meta.
    pub fn remove_trait<T: TypeTrait>(&mut self) -> Option<Box<dyn TypeTrait>> {
        self.trait_table.remove(&TypeId::of::<T>())
    }

    /// Get a [`TypeTrait`] reference, or return `None` if it doesn't exist.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .map(Deref::deref)
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Get a mutable [`TypeTrait`] reference, or return `None` if it doesn't exist.
    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .map(DerefMut::deref_mut)
            .and_then(<dyn TypeTrait>::downcast_mut)
    }

    /// Return true if specific [`TypeTrait`] exists.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Return the number of [`TypeTrait`].
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            trait_table.insert(*id, (**type_trait).clone_type_trait());
        }

        Self {
            type_info: self.type_info.clone(),
            trait_table,
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// # Implementation
///
/// ```
/// use kv_reflect::impl_reflect_opaque;
/// use kv_reflect::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};
///
/// #[derive(Default, PartialEq, Debug)]
/// struct A;
///
/// impl_reflect_opaque!(A);
///
/// impl GetTypeMeta for A {
///     fn get_type_meta() -> TypeMeta {
///         let mut meta = TypeMeta::of::<Self>();
///         meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
///         meta
///     }
/// }
///
/// let meta = A::get_type_meta();
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot provide type registration information",
    note = "consider registering it with `TypeRegistry::register_serde`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the **default** [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    /// **Allow** not to register oneself.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
