// -----------------------------------------------------------------------------
// For hash maps with a `BuildHasher` parameter

macro_rules! impl_reflect_for_hashmap {
    ($ty:path) => {
        impl<K, V, S> $crate::info::Typed for $ty
        where
            K: $crate::Reflect + $crate::info::Typed + Eq + ::core::hash::Hash,
            V: $crate::Reflect + $crate::info::Typed,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> $crate::info::TypeInfo {
                $crate::info::TypeInfo::Map($crate::info::MapInfo::new::<Self, K, V>())
            }
        }

        impl<K, V, S> $crate::Reflect for $ty
        where
            K: $crate::Reflect + $crate::info::Typed + Eq + ::core::hash::Hash,
            V: $crate::Reflect + $crate::info::Typed,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            $crate::reflection::impl_reflect_cast_fn!(Map);

            #[inline]
            fn reflect_eq(&self, value: &dyn $crate::Reflect) -> Option<bool> {
                $crate::impls::map_eq(self, value)
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::impls::map_debug(self, f)
            }
        }

        impl<K, V, S> $crate::ops::Map for $ty
        where
            K: $crate::Reflect + $crate::info::Typed + Eq + ::core::hash::Hash,
            V: $crate::Reflect + $crate::info::Typed,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            #[inline]
            fn is_empty(&self) -> bool {
                Self::is_empty(self)
            }

            fn get(&self, key: &dyn $crate::Reflect) -> Option<&dyn $crate::Reflect> {
                key.downcast_ref::<K>()
                    .and_then(|key| Self::get(self, key))
                    .map($crate::Reflect::as_reflect)
            }

            fn iter(
                &self,
            ) -> ::alloc::boxed::Box<
                dyn Iterator<Item = (&dyn $crate::Reflect, &dyn $crate::Reflect)> + '_,
            > {
                ::alloc::boxed::Box::new(
                    Self::iter(self)
                        .map(|(k, v)| (k as &dyn $crate::Reflect, v as &dyn $crate::Reflect)),
                )
            }

            fn try_insert(
                &mut self,
                key: ::alloc::boxed::Box<dyn $crate::Reflect>,
                value: ::alloc::boxed::Box<dyn $crate::Reflect>,
            ) -> Result<(), $crate::ops::MapInsertError> {
                let key = key
                    .take::<K>()
                    .map_err(|key| $crate::ops::MapInsertError::KeyMismatch {
                        expected: ::core::any::type_name::<K>(),
                        found: key.reflect_type_path(),
                    })?;
                let value = value
                    .take::<V>()
                    .map_err(|value| $crate::ops::MapInsertError::ValueMismatch {
                        expected: ::core::any::type_name::<V>(),
                        found: value.reflect_type_path(),
                    })?;

                if Self::contains_key(self, &key) {
                    return Err($crate::ops::MapInsertError::Occupied);
                }
                Self::insert(self, key, value);
                Ok(())
            }
        }

        impl<K, V, S> $crate::registry::GetTypeMeta for $ty
        where
            K: $crate::Reflect + $crate::registry::GetTypeMeta + Eq + ::core::hash::Hash,
            V: $crate::Reflect + $crate::registry::GetTypeMeta,
            S: ::core::hash::BuildHasher + Default + Send + Sync + 'static,
        {
            fn get_type_meta() -> $crate::registry::TypeMeta {
                let mut type_meta = $crate::registry::TypeMeta::with_capacity::<Self>(1);
                type_meta.insert_trait::<$crate::registry::TypeTraitDefault>(
                    $crate::registry::FromType::<Self>::from_type(),
                );
                type_meta
            }

            fn register_dependencies(registry: &mut $crate::registry::TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_reflect_for_hashmap!(kv_utils::hash::hashbrown::HashMap<K, V, S>);

#[cfg(feature = "std")]
impl_reflect_for_hashmap!(std::collections::HashMap<K, V, S>);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use kv_utils::hash::HashMap;

    use crate::ops::{Map, MapInsertError};

    #[test]
    fn hashbrown_map_rejects_occupied() {
        let mut map = HashMap::<String, i32>::default();
        map.insert(String::from("a"), 1);
        let dyn_map: &mut dyn Map = &mut map;

        let err = dyn_map
            .try_insert(Box::new(String::from("a")), Box::new(2_i32))
            .unwrap_err();
        assert_eq!(err, MapInsertError::Occupied);
        assert_eq!(map["a"], 1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_map_is_reflected() {
        let mut map = std::collections::HashMap::<u32, bool>::new();
        let dyn_map: &mut dyn Map = &mut map;
        dyn_map.try_insert(Box::new(4_u32), Box::new(true)).unwrap();
        assert!(dyn_map.contains_key(&4_u32));
        assert!(!dyn_map.contains_key(&5_u32));
    }
}
