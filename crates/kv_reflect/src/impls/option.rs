use core::fmt;
use core::hash::{Hash, Hasher};

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use crate::Reflect;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::registry::{
    FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault, TypeTraitDeserialize,
    TypeTraitSerialize,
};

impl<T> Typed for Option<T>
where
    T: Reflect + Typed + PartialEq + fmt::Debug,
{
    fn type_info() -> TypeInfo {
        TypeInfo::Opaque(OpaqueInfo::new::<Self>())
    }
}

impl<T> Reflect for Option<T>
where
    T: Reflect + Typed + PartialEq + fmt::Debug,
{
    crate::reflection::impl_reflect_cast_fn!(Opaque);

    #[inline]
    fn reflect_eq(&self, other: &dyn Reflect) -> Option<bool> {
        Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
    }

    fn reflect_hash(&self) -> Option<u64> {
        let mut hasher = crate::reflect_hasher();
        match self {
            None => 0_u8.hash(&mut hasher),
            Some(value) => {
                1_u8.hash(&mut hasher);
                value.reflect_hash()?.hash(&mut hasher);
            }
        }
        Some(hasher.finish())
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<T> GetTypeMeta for Option<T>
where
    T: Reflect + GetTypeMeta + PartialEq + fmt::Debug + Serialize + DeserializeOwned,
{
    fn get_type_meta() -> TypeMeta {
        let mut type_meta = TypeMeta::with_capacity::<Self>(3);
        type_meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        type_meta.insert_trait::<TypeTraitSerialize>(FromType::<Self>::from_type());
        type_meta.insert_trait::<TypeTraitDeserialize>(FromType::<Self>::from_type());
        type_meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;

    #[test]
    fn option_hash_depends_on_payload() {
        let some: &dyn Reflect = &Some(3_u8);
        let none: &dyn Reflect = &None::<u8>;
        assert_ne!(some.reflect_hash(), none.reflect_hash());
        assert_eq!(some.reflect_eq(&Some(3_u8)), Some(true));
        assert_eq!(Some(1.0_f64).reflect_hash(), None);
    }
}
