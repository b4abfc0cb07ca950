use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt;

use tracing::debug;

use crate::Reflect;
use crate::data::{Data, DataKind, DataSerializer, FieldMap};
use crate::info::{ElementType, Type, Typed};
use crate::registry::{TypeMeta, TypeRegistry, TypeTraitDeserialize, TypeTraitSerialize};
use crate::serde::{
    ConvertError, Converter, DictionaryConverter, Dispatcher, IdentifierPolicy, TypeResolver,
};

// -----------------------------------------------------------------------------
// SerdeDriver

/// The reference [`Dispatcher`]: picks a converter per type, or falls back
/// to `serde`.
///
/// # Conversion Rules
///
/// For a value declared as [`ElementType::Typed`], the driver follows a
/// three-step priority order:
///
/// 1. **Converter Priority**: the first installed [`Converter`] whose
///    [`can_process`](Converter::can_process) accepts the type.
/// 2. **Trait Fallback**: [`TypeTraitSerialize`] / [`TypeTraitDeserialize`]
///    from the type's metadata.
/// 3. Otherwise the conversion fails with [`ConvertError::NoConverter`].
///
/// Values declared as [`ElementType::Any`] are written together with their
/// runtime type path, and read back by looking that path up in the registry:
///
/// ```text
/// { "$type": "i32", "$content": 1 }
/// ```
///
/// A [`Data::Null`] node always deserializes to an absent value.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use kv_reflect::data::Data;
/// use kv_reflect::registry::TypeRegistry;
/// use kv_reflect::serde::SerdeDriver;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<BTreeMap<String, i32>>();
///
/// let driver = SerdeDriver::new(&registry);
///
/// let data: Data = serde_json::from_str(r#"[{"Key":"a","Value":1}]"#).unwrap();
/// let map: BTreeMap<String, i32> = driver.deserialize_value(&data).unwrap();
///
/// assert_eq!(map["a"], 1);
/// ```
pub struct SerdeDriver<'a> {
    registry: &'a TypeRegistry,
    converters: Vec<Box<dyn Converter>>,
}

impl<'a> SerdeDriver<'a> {
    /// The envelope field holding the type path of an untyped element.
    pub const TYPE_FIELD: &'static str = "$type";
    /// The envelope field holding the data of an untyped element.
    pub const CONTENT_FIELD: &'static str = "$content";

    /// Creates a driver with the [`DictionaryConverter`] installed.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            converters: vec![Box::new(DictionaryConverter)],
        }
    }

    /// Creates a driver without converters, which only uses `serde`.
    #[inline]
    pub const fn empty(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            converters: Vec::new(),
        }
    }

    /// Installs a converter after the existing ones.
    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Box::new(converter));
        self
    }

    /// Returns the registry.
    #[inline]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Serializes a value as its own runtime type.
    pub fn serialize_value(&self, value: &dyn Reflect) -> Result<Data, ConvertError> {
        self.serialize_typed(value, value.reflect_ty())
    }

    /// Deserializes a value of type `T`.
    ///
    /// Fails with [`ConvertError::Absent`] if `data` is null.
    pub fn deserialize_value<T: Reflect + Typed>(&self, data: &Data) -> Result<T, ConvertError> {
        let value = self
            .deserialize(data, &ElementType::of::<T>())?
            .ok_or(ConvertError::Absent {
                type_path: type_name::<T>(),
            })?;
        value
            .take::<T>()
            .map_err(|value| ConvertError::ElementTypeMismatch {
                expected: type_name::<T>(),
                found: value.reflect_type_path(),
            })
    }

    /// Populates a caller-owned instance from `data`.
    ///
    /// Only types handled by a converter can be populated in place. Entries
    /// converted before a failure stay in the instance.
    pub fn deserialize_into(
        &self,
        data: &Data,
        instance: &mut dyn Reflect,
    ) -> Result<(), ConvertError> {
        let meta = self.type_meta(instance.reflect_ty())?;
        match self.converter_for(meta) {
            Some(converter) => converter.try_deserialize(data, instance, meta, self),
            None => Err(ConvertError::NoConverter {
                type_path: meta.type_path(),
            }),
        }
    }

    fn type_meta(&self, ty: Type) -> Result<&'a TypeMeta, ConvertError> {
        self.registry
            .get(ty.id())
            .ok_or(ConvertError::UnregisteredType {
                type_path: ty.path(),
            })
    }

    fn converter_for(&self, meta: &TypeMeta) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .find(|converter| converter.can_process(meta))
            .map(|converter| &**converter)
    }

    fn serialize_typed(&self, value: &dyn Reflect, ty: Type) -> Result<Data, ConvertError> {
        if value.ty_id() != ty.id() {
            return Err(ConvertError::ElementTypeMismatch {
                expected: ty.path(),
                found: value.reflect_type_path(),
            });
        }
        let meta = self.type_meta(ty)?;

        if let Some(converter) = self.converter_for(meta) {
            debug!(ty = ty.path(), converter = converter.name(), "serialize with converter");
            return converter.try_serialize(value, meta, self);
        }

        if let Some(serialize) = meta.get_trait::<TypeTraitSerialize>()
            && let Some(result) = serialize.serialize(value, DataSerializer)
        {
            debug!(ty = ty.path(), "serialize with serde");
            return Ok(result?);
        }

        Err(ConvertError::NoConverter {
            type_path: ty.path(),
        })
    }

    fn deserialize_typed(&self, data: &Data, meta: &TypeMeta) -> Result<Box<dyn Reflect>, ConvertError> {
        if let Some(converter) = self.converter_for(meta) {
            debug!(ty = meta.type_path(), converter = converter.name(), "deserialize with converter");
            let mut instance = converter.create_instance(meta)?;
            converter.try_deserialize(data, &mut *instance, meta, self)?;
            return Ok(instance);
        }

        if let Some(deserialize) = meta.get_trait::<TypeTraitDeserialize>() {
            debug!(ty = meta.type_path(), "deserialize with serde");
            return Ok(deserialize.deserialize(data)?);
        }

        Err(ConvertError::NoConverter {
            type_path: meta.type_path(),
        })
    }

    fn open_envelope<'d>(&self, data: &'d Data) -> Result<(&'a TypeMeta, &'d Data), ConvertError> {
        let Data::FieldMap(fields) = data else {
            return Err(ConvertError::TypeMismatch {
                index: None,
                expected: DataKind::FieldMap,
                found: data.kind(),
            });
        };
        let field = |name: &'static str| {
            fields.get(name).ok_or(ConvertError::MissingField {
                index: None,
                field: name.into(),
            })
        };

        let type_data = field(Self::TYPE_FIELD)?;
        let Some(type_path) = type_data.as_str() else {
            return Err(ConvertError::TypeMismatch {
                index: None,
                expected: DataKind::String,
                found: type_data.kind(),
            });
        };
        let meta = self.registry.get_with_type_path(type_path).ok_or_else(|| {
            ConvertError::UnregisteredTypePath {
                type_path: type_path.to_string(),
            }
        })?;

        Ok((meta, field(Self::CONTENT_FIELD)?))
    }
}

impl Dispatcher for SerdeDriver<'_> {
    fn serialize(&self, value: &dyn Reflect, ty: &ElementType) -> Result<Data, ConvertError> {
        match ty {
            ElementType::Typed(ty) => self.serialize_typed(value, *ty),
            ElementType::Any => {
                let ty = value.reflect_ty();
                let content = self.serialize_typed(value, ty)?;

                let mut envelope = FieldMap::with_capacity(2);
                envelope.insert(Self::TYPE_FIELD, Data::from(ty.path()));
                envelope.insert(Self::CONTENT_FIELD, content);
                Ok(Data::FieldMap(envelope))
            }
        }
    }

    fn deserialize(
        &self,
        data: &Data,
        ty: &ElementType,
    ) -> Result<Option<Box<dyn Reflect>>, ConvertError> {
        if data.is_null() {
            return Ok(None);
        }
        let (meta, data) = match ty {
            ElementType::Typed(ty) => (self.type_meta(*ty)?, data),
            ElementType::Any => self.open_envelope(data)?,
        };
        if data.is_null() {
            return Ok(None);
        }
        self.deserialize_typed(data, meta).map(Some)
    }

    #[inline]
    fn type_resolver(&self) -> &dyn TypeResolver {
        self.registry
    }

    #[inline]
    fn identifier_policy(&self) -> &dyn IdentifierPolicy {
        self.registry
    }
}

impl fmt::Debug for SerdeDriver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeDriver")
            .field(
                "converters",
                &self.converters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
