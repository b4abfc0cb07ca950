use alloc::boxed::Box;
use core::any::TypeId;

use crate::Reflect;
use crate::data::Data;
use crate::info::{ElementType, MapTypes};
use crate::serde::ConvertError;

/// Resolves the declared element types of a map type.
///
/// Never fails: maps whose element types are unknown resolve to
/// [`MapTypes::ANY`].
pub trait TypeResolver {
    fn resolve_map(&self, map_ty: TypeId) -> MapTypes;
}

/// Names the identifier field of a map's value type, if it has one.
pub trait IdentifierPolicy {
    fn identifier_field(&self, value: &ElementType) -> Option<&str>;
}

/// The entry point converters call back into for nested values.
///
/// A converter never serializes a key or value itself, it asks the
/// dispatcher to, which picks the right converter for the element type.
pub trait Dispatcher {
    /// Serializes `value`, declared as `ty`.
    fn serialize(&self, value: &dyn Reflect, ty: &ElementType) -> Result<Data, ConvertError>;

    /// Deserializes `data` as `ty`.
    ///
    /// Returns `Ok(None)` if the data denotes an absent value.
    fn deserialize(
        &self,
        data: &Data,
        ty: &ElementType,
    ) -> Result<Option<Box<dyn Reflect>>, ConvertError>;

    fn type_resolver(&self) -> &dyn TypeResolver;

    fn identifier_policy(&self) -> &dyn IdentifierPolicy;
}
