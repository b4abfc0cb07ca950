use alloc::borrow::Cow;

/// Names the identifier field of a value type.
///
/// When a map's value type carries this trait, converters write the map key
/// into that field of each serialized value on deserialization, and remove the
/// field on serialization. The field is only touched when the value's data is
/// a field-map.
///
/// Usually attached with [`TypeRegistry::set_identifier_field`].
///
/// [`TypeRegistry::set_identifier_field`]: crate::registry::TypeRegistry::set_identifier_field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeTraitIdentifier {
    field: Cow<'static, str>,
}

impl TypeTraitIdentifier {
    /// Creates the trait for the field `field`.
    #[inline]
    pub fn new(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }
}
