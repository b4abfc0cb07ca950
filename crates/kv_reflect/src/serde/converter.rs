use alloc::boxed::Box;

use crate::Reflect;
use crate::data::Data;
use crate::registry::{TypeMeta, TypeTraitDefault};
use crate::serde::{ConvertError, Dispatcher};

/// A pluggable handler for a family of types.
///
/// A [`Dispatcher`] asks every installed converter in order whether it
/// [can process](Converter::can_process) a type, and hands the value to the
/// first one that can.
pub trait Converter: Send + Sync {
    /// Returns a name for logs.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns `true` if this converter handles the type of `meta`.
    fn can_process(&self, meta: &TypeMeta) -> bool;

    /// Creates an empty instance of the type of `meta`, to be filled by
    /// [`try_deserialize`](Converter::try_deserialize).
    ///
    /// Uses [`TypeTraitDefault`] by default.
    fn create_instance(&self, meta: &TypeMeta) -> Result<Box<dyn Reflect>, ConvertError> {
        meta.get_trait::<TypeTraitDefault>()
            .map(TypeTraitDefault::default)
            .ok_or(ConvertError::NoInstanceFactory {
                type_path: meta.type_path(),
            })
    }

    /// Serializes `value`, whose type is described by `meta`.
    fn try_serialize(
        &self,
        value: &dyn Reflect,
        meta: &TypeMeta,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Data, ConvertError>;

    /// Populates `instance` from `data`.
    ///
    /// On failure the instance keeps whatever was populated before it.
    fn try_deserialize(
        &self,
        data: &Data,
        instance: &mut dyn Reflect,
        meta: &TypeMeta,
        dispatcher: &dyn Dispatcher,
    ) -> Result<(), ConvertError>;
}
