use alloc::borrow::Cow;
use alloc::string::ToString;
use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::Reflect;
use crate::data::{Data, DataKind, FieldMap};
use crate::ops::ReflectMut;
use crate::registry::TypeMeta;
use crate::serde::{ConvertError, Converter, Dispatcher, EntryPart};

// -----------------------------------------------------------------------------
// DictionaryConverter

/// Converts maps to and from a list of `{"Key", "Value"}` records.
///
/// Keys are not assumed to be strings, each entry is written as an explicit
/// record, in the map's own iteration order:
///
/// ```text
/// [ {"Key": "A", "Value": 1}, {"Key": "B", "Value": 2} ]
/// ```
///
/// Keys and values are converted through the [`Dispatcher`], as the element
/// types resolved from the map type. Maps without typed elements, such as
/// [`DynamicMap`], resolve to [`ElementType::Any`].
///
/// # Identifier field
///
/// If the value type has an identifier field (see [`IdentifierPolicy`]),
/// that field is removed from each serialized value, and on deserialization it
/// is filled from the record's `"Key"` before the value is read. Values whose
/// data is not a field-map are left untouched.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use kv_reflect::registry::TypeRegistry;
/// use kv_reflect::serde::SerdeDriver;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<BTreeMap<u32, bool>>();
///
/// let driver = SerdeDriver::new(&registry);
/// let map = BTreeMap::from([(1_u32, true), (2, false)]);
///
/// let data = driver.serialize_value(&map).unwrap();
/// assert_eq!(
///     data.to_string(),
///     r#"[{"Key":1,"Value":true},{"Key":2,"Value":false}]"#,
/// );
/// ```
///
/// [`DynamicMap`]: crate::ops::DynamicMap
/// [`ElementType::Any`]: crate::info::ElementType::Any
/// [`IdentifierPolicy`]: crate::serde::IdentifierPolicy
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryConverter;

impl DictionaryConverter {
    /// The record field holding the entry key.
    pub const KEY: &'static str = "Key";
    /// The record field holding the entry value.
    pub const VALUE: &'static str = "Value";
}

fn warn_not_field_map(warned: &mut bool, type_path: &str, field: &str, found: DataKind) {
    if !*warned {
        *warned = true;
        warn!(
            map = type_path,
            field,
            %found,
            "identifier field ignored, map value is not a field-map"
        );
    }
}

impl Converter for DictionaryConverter {
    fn name(&self) -> &'static str {
        "DictionaryConverter"
    }

    #[inline]
    fn can_process(&self, meta: &TypeMeta) -> bool {
        meta.type_info().is_map()
    }

    fn try_serialize(
        &self,
        value: &dyn Reflect,
        _meta: &TypeMeta,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Data, ConvertError> {
        let type_path = value.reflect_type_path();
        let Some(map) = value.reflect_ref().as_map() else {
            return Err(ConvertError::NotAMap { type_path });
        };

        let types = dispatcher.type_resolver().resolve_map(value.ty_id());
        let identifier = dispatcher.identifier_policy().identifier_field(&types.value);
        debug!(
            map = type_path,
            key = %types.key,
            value = %types.value,
            identifier,
            len = map.len(),
            "serializing map"
        );

        let mut warned = false;
        let mut records = Vec::with_capacity(map.len());
        for (index, (key, value)) in map.iter().enumerate() {
            trace!(index, "serializing entry");
            let key_data = dispatcher
                .serialize(key, &types.key)
                .map_err(|e| ConvertError::entry(index, EntryPart::Key, e))?;
            let mut value_data = dispatcher
                .serialize(value, &types.value)
                .map_err(|e| ConvertError::entry(index, EntryPart::Value, e))?;

            if let Some(field) = identifier {
                match value_data.as_field_map_mut() {
                    Some(fields) => {
                        fields.remove(field);
                    }
                    None => warn_not_field_map(&mut warned, type_path, field, value_data.kind()),
                }
            }

            let mut record = FieldMap::with_capacity(2);
            record.insert(Self::KEY, key_data);
            record.insert(Self::VALUE, value_data);
            records.push(Data::FieldMap(record));
        }

        Ok(Data::List(records))
    }

    fn try_deserialize(
        &self,
        data: &Data,
        instance: &mut dyn Reflect,
        _meta: &TypeMeta,
        dispatcher: &dyn Dispatcher,
    ) -> Result<(), ConvertError> {
        let Data::List(records) = data else {
            return Err(ConvertError::TypeMismatch {
                index: None,
                expected: DataKind::List,
                found: data.kind(),
            });
        };

        let map_ty = instance.ty_id();
        let type_path = instance.reflect_type_path();
        let ReflectMut::Map(map) = instance.reflect_mut() else {
            return Err(ConvertError::NotAMap { type_path });
        };

        let types = dispatcher.type_resolver().resolve_map(map_ty);
        let identifier = dispatcher.identifier_policy().identifier_field(&types.value);
        debug!(
            map = type_path,
            key = %types.key,
            value = %types.value,
            identifier,
            len = records.len(),
            "deserializing map"
        );

        let mut warned = false;
        for (index, record) in records.iter().enumerate() {
            trace!(index, "deserializing entry");
            let Data::FieldMap(fields) = record else {
                return Err(ConvertError::TypeMismatch {
                    index: Some(index),
                    expected: DataKind::FieldMap,
                    found: record.kind(),
                });
            };
            let missing = |field: &'static str| ConvertError::MissingField {
                index: Some(index),
                field: Cow::Borrowed(field),
            };
            let key_data = fields.get(Self::KEY).ok_or_else(|| missing(Self::KEY))?;
            let value_data = fields.get(Self::VALUE).ok_or_else(|| missing(Self::VALUE))?;

            // The input tree is shared, so the identifier goes into a copy.
            let value_data = match (identifier, value_data) {
                (Some(field), Data::FieldMap(value_fields)) => {
                    let mut value_fields = value_fields.clone();
                    value_fields.insert(field, key_data.clone());
                    Cow::Owned(Data::FieldMap(value_fields))
                }
                (Some(field), other) => {
                    warn_not_field_map(&mut warned, type_path, field, other.kind());
                    Cow::Borrowed(other)
                }
                (None, value_data) => Cow::Borrowed(value_data),
            };

            let key = dispatcher
                .deserialize(key_data, &types.key)
                .map_err(|e| ConvertError::entry(index, EntryPart::Key, e))?;
            let value = dispatcher
                .deserialize(&value_data, &types.value)
                .map_err(|e| ConvertError::entry(index, EntryPart::Value, e))?;

            let (Some(key), Some(value)) = (key, value) else {
                return Err(ConvertError::NullKeyOrValue { index });
            };

            if map.contains_key(&*key) {
                return Err(ConvertError::DuplicateKey {
                    index,
                    key: key_data.to_string(),
                });
            }
            map.try_insert(key, value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::DictionaryConverter;
    use crate::Reflect;
    use crate::data::{Data, FieldMap};
    use crate::info::{ElementType, MapTypes};
    use crate::registry::{GetTypeMeta, TypeMeta};
    use crate::serde::{
        ConvertError, Converter, Dispatcher, EntryPart, IdentifierPolicy, TypeResolver,
    };

    /// Serializes `u8` as numbers and fails on everything else.
    struct Bytes;

    impl TypeResolver for Bytes {
        fn resolve_map(&self, _map_ty: TypeId) -> MapTypes {
            MapTypes::of::<u8, u8>()
        }
    }

    impl IdentifierPolicy for Bytes {
        fn identifier_field(&self, _value: &ElementType) -> Option<&str> {
            None
        }
    }

    impl Dispatcher for Bytes {
        fn serialize(&self, value: &dyn Reflect, _ty: &ElementType) -> Result<Data, ConvertError> {
            match value.downcast_ref::<u8>() {
                Some(v) if *v < 100 => Ok(Data::from(u64::from(*v))),
                _ => Err(ConvertError::NoConverter {
                    type_path: value.reflect_type_path(),
                }),
            }
        }

        fn deserialize(
            &self,
            data: &Data,
            _ty: &ElementType,
        ) -> Result<Option<Box<dyn Reflect>>, ConvertError> {
            match data {
                Data::Null => Ok(None),
                data => Ok(Some(Box::new(crate::data::from_data::<u8>(data)?))),
            }
        }

        fn type_resolver(&self) -> &dyn TypeResolver {
            self
        }

        fn identifier_policy(&self) -> &dyn IdentifierPolicy {
            self
        }
    }

    fn record(key: Data, value: Data) -> Data {
        let mut record = FieldMap::new();
        record.insert("Key", key);
        record.insert("Value", value);
        Data::FieldMap(record)
    }

    fn meta() -> TypeMeta {
        BTreeMap::<u8, u8>::get_type_meta()
    }

    #[test]
    fn only_maps_are_processed() {
        assert!(DictionaryConverter.can_process(&meta()));
        assert!(!DictionaryConverter.can_process(&u8::get_type_meta()));
    }

    #[test]
    fn serialize_wraps_value_failures() {
        let map = BTreeMap::from([(1_u8, 2_u8), (3, 200)]);
        let err = DictionaryConverter
            .try_serialize(&map, &meta(), &Bytes)
            .unwrap_err();

        let ConvertError::Entry { index, part, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!((*index, *part), (1, EntryPart::Value));
        assert!(matches!(err.root_cause(), ConvertError::NoConverter { type_path: "u8" }));
    }

    #[test]
    fn deserialize_stops_at_null_and_keeps_earlier_entries() {
        let data = Data::List(vec![
            record(Data::from(1_u64), Data::from(10_u64)),
            record(Data::from(2_u64), Data::Null),
            record(Data::from(3_u64), Data::from(30_u64)),
        ]);
        let mut map = BTreeMap::<u8, u8>::new();

        let err = DictionaryConverter
            .try_deserialize(&data, &mut map, &meta(), &Bytes)
            .unwrap_err();

        assert!(matches!(err, ConvertError::NullKeyOrValue { index: 1 }));
        assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 10)]);
    }

    #[test]
    fn extra_record_fields_are_ignored() {
        let mut fields = FieldMap::new();
        fields.insert("Note", Data::from("ignored"));
        fields.insert("Value", Data::from(5_u64));
        fields.insert("Key", Data::from(4_u64));
        let data = Data::List(vec![Data::FieldMap(fields)]);
        let mut map = BTreeMap::<u8, u8>::new();

        DictionaryConverter
            .try_deserialize(&data, &mut map, &meta(), &Bytes)
            .unwrap();
        assert_eq!(map.get(&4), Some(&5));
    }

    #[test]
    fn non_map_instance_is_rejected() {
        let mut value = String::new();
        let err = DictionaryConverter
            .try_deserialize(&Data::List(vec![]), &mut value, &meta(), &Bytes)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotAMap { .. }));
    }
}
