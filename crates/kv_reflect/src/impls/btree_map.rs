use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::type_name;

use crate::Reflect;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MapInsertError};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Map(MapInfo::new::<Self, K, V>())
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    crate::reflection::impl_reflect_cast_fn!(Map);

    #[inline]
    fn reflect_eq(&self, value: &dyn Reflect) -> Option<bool> {
        crate::impls::map_eq(self, value)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        crate::impls::map_debug(self, f)
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        key.downcast_ref::<K>()
            .and_then(|key| Self::get(self, key))
            .map(Reflect::as_reflect)
    }

    #[inline]
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(Self::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn try_insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), MapInsertError> {
        let key = key.take::<K>().map_err(|key| MapInsertError::KeyMismatch {
            expected: type_name::<K>(),
            found: key.reflect_type_path(),
        })?;
        let value = value
            .take::<V>()
            .map_err(|value| MapInsertError::ValueMismatch {
                expected: type_name::<V>(),
                found: value.reflect_type_path(),
            })?;

        match self.entry(key) {
            alloc::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
            alloc::collections::btree_map::Entry::Occupied(_) => Err(MapInsertError::Occupied),
        }
    }
}

impl<K, V> GetTypeMeta for BTreeMap<K, V>
where
    K: Reflect + GetTypeMeta + Ord,
    V: Reflect + GetTypeMeta,
{
    fn get_type_meta() -> TypeMeta {
        let mut type_meta = TypeMeta::with_capacity::<Self>(1);
        type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        type_meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ElementType, Typed};
    use crate::ops::{Map, MapInsertError};

    #[test]
    fn type_info_declares_elements() {
        let info = <BTreeMap<u8, String> as Typed>::type_info();
        let map = info.as_map().unwrap();
        assert_eq!(map.key(), ElementType::of::<u8>());
        assert_eq!(map.value(), ElementType::of::<String>());
    }

    #[test]
    fn try_insert_checks_types() {
        let mut map = BTreeMap::<u8, String>::new();
        let dyn_map: &mut dyn Map = &mut map;

        let err = dyn_map
            .try_insert(Box::new(1_i32), Box::new(String::new()))
            .unwrap_err();
        assert!(matches!(err, MapInsertError::KeyMismatch { found: "i32", .. }));

        let err = dyn_map.try_insert(Box::new(1_u8), Box::new(1_u8)).unwrap_err();
        assert!(matches!(err, MapInsertError::ValueMismatch { found: "u8", .. }));
        assert!(dyn_map.is_empty());
    }

    #[test]
    fn reflect_eq_ignores_container_type() {
        let a: BTreeMap<u8, u8> = [(1, 2)].into_iter().collect();
        let mut b = crate::ops::DynamicMap::new();
        b.insert(1_u8, 2_u8).unwrap();
        assert_eq!(a.reflect_eq(&b), Some(true));
    }
}
