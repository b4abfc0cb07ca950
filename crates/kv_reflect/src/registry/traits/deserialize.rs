use alloc::boxed::Box;

use serde_core::{Deserialize, Deserializer};

use crate::Reflect;
use crate::info::Typed;
use crate::registry::FromType;

/// A container providing `serde` deserialization support for reflected types.
///
/// Internally stores a function pointer for one specific type, which
/// deserializes a value of that type and boxes it as `dyn Reflect`.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use kv_reflect::registry::{TypeTraitDeserialize, TypeRegistry};
/// use kv_reflect::data::Data;
///
/// let registry = TypeRegistry::new();
///
/// let processor = registry.get_type_trait::<TypeTraitDeserialize>(TypeId::of::<u16>()).unwrap();
///
/// let val = processor.deserialize(&Data::from(7_i64)).unwrap();
///
/// assert_eq!(val.take::<u16>().unwrap(), 7);
/// ```
#[derive(Clone)]
pub struct TypeTraitDeserialize {
    func: fn(
        deserializer: &mut dyn erased_serde::Deserializer,
    ) -> Result<Box<dyn Reflect>, erased_serde::Error>,
}

impl TypeTraitDeserialize {
    /// Deserializes a reflected value.
    ///
    /// See [`TypeTraitDeserialize`] for examples.
    #[inline(always)]
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        (self.func)(&mut erased).map_err(<D::Error as serde_core::de::Error>::custom)
    }
}

impl<T: for<'a> Deserialize<'a> + Typed + Reflect> FromType<T> for TypeTraitDeserialize {
    fn from_type() -> Self {
        Self {
            func: |deserializer| Ok(Box::new(T::deserialize(deserializer)?)),
        }
    }
}
