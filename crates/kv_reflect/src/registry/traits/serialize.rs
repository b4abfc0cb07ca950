use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// A container providing `serde` serialization support for reflected types.
///
/// Internally stores a function pointer for one specific type. Given a
/// reflected value of that type, it downcasts and invokes the type's
/// `Serialize` implementation.
///
/// # Examples
///
/// ```
/// use kv_reflect::registry::{TypeTraitSerialize, TypeRegistry};
/// use kv_reflect::data::{Data, DataSerializer};
/// use kv_reflect::Reflect;
///
/// let registry = TypeRegistry::new();
/// let value: &dyn Reflect = &123_i32;
///
/// let processor = registry.get_type_trait::<TypeTraitSerialize>(value.ty_id()).unwrap();
///
/// let data = processor.serialize(value, DataSerializer).unwrap().unwrap();
/// assert_eq!(data, Data::from(123_i64));
///
/// // A value of another type is not serialized.
/// assert!(processor.serialize(&1_u8, DataSerializer).is_none());
/// ```
#[derive(Clone)]
pub struct TypeTraitSerialize {
    fun: fn(value: &dyn Reflect) -> Option<&dyn erased_serde::Serialize>,
}

impl<T: Serialize + Typed + Reflect> FromType<T> for TypeTraitSerialize {
    fn from_type() -> Self {
        Self {
            fun: |value| {
                value
                    .downcast_ref::<T>()
                    .map(|val| val as &dyn erased_serde::Serialize)
            },
        }
    }
}

impl TypeTraitSerialize {
    /// Call T's [`Serialize`].
    ///
    /// Returns `None` if `value` is not of the type this trait was built for.
    #[inline]
    pub fn serialize<S: Serializer>(
        &self,
        value: &dyn Reflect,
        serializer: S,
    ) -> Option<Result<S::Ok, S::Error>> {
        (self.fun)(value).map(|value| value.serialize(serializer))
    }
}
