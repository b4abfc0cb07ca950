use alloc::borrow::Cow;
use alloc::string::String;
use core::any::TypeId;

use kv_utils::TypeIdMap;
use kv_utils::hash::{FixedHashState, HashMap};
use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use crate::Reflect;
use crate::info::{ElementType, MapTypes, TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};
use crate::registry::{TypeTraitDefault, TypeTraitDeserialize, TypeTraitIdentifier};
use crate::registry::TypeTraitSerialize;
use crate::serde::{IdentifierPolicy, TypeResolver};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// This struct is used as the central store for type information.
/// [Registering] a type will generate a new [`TypeMeta`] entry in this store
/// using a type's [`GetTypeMeta`] implementation.
///
/// Converters query it through [`TypeResolver`] and [`IdentifierPolicy`].
///
/// # Example
///
/// ```
/// use kv_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_path("alloc::string::String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let s = generator.default();
/// assert_eq!(s.reflect_type_path(), "alloc::string::String");
///
/// let s = s.take::<String>().unwrap();
/// assert_eq!(s, "");
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // - If key [`TypeId`] has already exist, the function will do nothing and return `false`.
    // - If the key [`TypeId`] does not exist, the function will insert value and return `true`.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            self.type_path_to_id.insert(meta.type_path(), meta.type_id());
            meta
        })
    }

    /// Insert or **Overwrite** a [`TypeMeta`].
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        self.type_path_to_id
            .insert(type_meta.type_path(), type_meta.type_id());
        self.type_meta_table.insert(type_meta.type_id(), type_meta);
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This will also recursively register any type dependencies as specified by
    /// [`GetTypeMeta::register_dependencies`], such as the key and value types
    /// of a map. Types are not registered more than once.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use std::collections::BTreeMap;
    /// # use kv_reflect::registry::{TypeRegistry, TypeTraitDefault};
    /// let mut type_registry = TypeRegistry::empty();
    ///
    /// type_registry.register::<BTreeMap<u8, Option<String>>>();
    ///
    /// // The main type
    /// assert!(type_registry.contains(TypeId::of::<BTreeMap<u8, Option<String>>>()));
    ///
    /// // Its type dependencies
    /// assert!(type_registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(type_registry.contains(TypeId::of::<String>()));
    /// assert!(type_registry.contains(TypeId::of::<u8>()));
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers a type that is (de)serialized through `serde`.
    ///
    /// The type receives [`TypeTraitDefault`], [`TypeTraitSerialize`] and
    /// [`TypeTraitDeserialize`]. If it is already registered, the traits are
    /// added to the existing [`TypeMeta`].
    ///
    /// # Example
    ///
    /// ```
    /// use kv_reflect::impl_reflect_opaque;
    /// use kv_reflect::registry::{TypeRegistry, TypeTraitSerialize};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize, Deserialize, Default, PartialEq, Debug)]
    /// struct Player {
    ///     score: u32,
    /// }
    ///
    /// impl_reflect_opaque!(Player);
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register_serde::<Player>();
    ///
    /// assert!(registry.get_type_trait::<TypeTraitSerialize>(core::any::TypeId::of::<Player>()).is_some());
    /// ```
    pub fn register_serde<T>(&mut self)
    where
        T: Reflect + Typed + Default + Serialize + DeserializeOwned,
    {
        self.register_internal(TypeId::of::<T>(), || TypeMeta::with_capacity::<T>(3));
        if let Some(type_meta) = self.get_mut(TypeId::of::<T>()) {
            type_meta.insert_trait::<TypeTraitDefault>(FromType::<T>::from_type());
            type_meta.insert_trait::<TypeTraitSerialize>(FromType::<T>::from_type());
            type_meta.insert_trait::<TypeTraitDeserialize>(FromType::<T>::from_type());
        }
    }

    /// Registers the type trait `D` for type `T`.
    ///
    /// Returns `false` and does nothing if `T` has not been registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) -> bool {
        self.insert_type_trait::<D>(TypeId::of::<T>(), D::from_type())
    }

    /// Inserts a type trait for the type with the given [`TypeId`].
    ///
    /// Returns `false` and does nothing if the type has not been registered.
    pub fn insert_type_trait<D: TypeTrait>(&mut self, type_id: TypeId, type_trait: D) -> bool {
        match self.get_mut(type_id) {
            Some(type_meta) => {
                type_meta.insert_trait(type_trait);
                true
            }
            None => false,
        }
    }

    /// Declares the identifier field of the value type `T`.
    ///
    /// When `T` is the value type of a map, the converter fills this field
    /// from the map key when reading and strips it when writing.
    ///
    /// Returns `false` and does nothing if `T` has not been registered.
    #[inline]
    pub fn set_identifier_field<T: Typed>(&mut self, field: impl Into<Cow<'static, str>>) -> bool {
        self.insert_type_trait(TypeId::of::<T>(), TypeTraitIdentifier::new(field))
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given [`TypeId`].
    ///
    /// If the specified type has not been registered, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns a mutable reference to the [`TypeMeta`] of the type with
    /// the given [`TypeId`].
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given type path, as returned by [`core::any::type_name`].
    ///
    /// If no type with the given type path has been registered, returns `None`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns a reference to the [`TypeTrait`] of type `T` associated with the given [`TypeId`].
    ///
    /// If the specified type has not been registered, or if `T` is not present
    /// in its type registration, returns `None`.
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns the [`TypeInfo`] associated with the given [`TypeId`].
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    /// Returns `true` if no type is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_meta_table.is_empty()
    }

    /// Returns an iterator over the [`TypeMeta`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.type_path_to_id.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Converter contracts

impl TypeResolver for TypeRegistry {
    fn resolve_map(&self, map_ty: TypeId) -> MapTypes {
        self.get_type_info(map_ty)
            .and_then(TypeInfo::as_map)
            .map_or(MapTypes::ANY, |info| info.types())
    }
}

impl IdentifierPolicy for TypeRegistry {
    fn identifier_field(&self, value: &ElementType) -> Option<&str> {
        let ty = value.ty()?;
        self.get_type_trait::<TypeTraitIdentifier>(ty.id())
            .map(TypeTraitIdentifier::field)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::info::{ElementType, MapTypes};
    use crate::ops::DynamicMap;
    use crate::serde::{IdentifierPolicy, TypeResolver};

    #[test]
    fn resolve_map_types() {
        let mut registry = TypeRegistry::new();
        registry.register::<BTreeMap<u8, String>>();
        registry.register::<DynamicMap>();

        let types = registry.resolve_map(TypeId::of::<BTreeMap<u8, String>>());
        assert_eq!(types, MapTypes::of::<u8, String>());

        assert_eq!(registry.resolve_map(TypeId::of::<DynamicMap>()), MapTypes::ANY);
        assert_eq!(registry.resolve_map(TypeId::of::<u8>()), MapTypes::ANY);
        assert_eq!(registry.resolve_map(TypeId::of::<BTreeMap<u8, u8>>()), MapTypes::ANY);
    }

    #[test]
    fn identifier_field_needs_registration() {
        let mut registry = TypeRegistry::empty();
        assert!(!registry.set_identifier_field::<String>("id"));

        registry.register::<String>();
        assert!(registry.set_identifier_field::<String>("id"));
        assert_eq!(registry.identifier_field(&ElementType::of::<String>()), Some("id"));
        assert_eq!(registry.identifier_field(&ElementType::Any), None);
    }

    #[test]
    fn lookup_by_type_path() {
        let registry = TypeRegistry::new();
        let meta = registry.get_with_type_path("u32").unwrap();
        assert_eq!(meta.type_id(), TypeId::of::<u32>());
        assert!(registry.get_with_type_path("u256").is_none());
    }
}
