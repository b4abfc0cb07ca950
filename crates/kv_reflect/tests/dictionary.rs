use std::collections::{BTreeMap, HashMap};

use kv_reflect::Reflect;
use kv_reflect::data::{Data, DataKind};
use kv_reflect::impl_reflect_opaque;
use kv_reflect::info::Typed;
use kv_reflect::ops::{DynamicMap, Map};
use kv_reflect::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use kv_reflect::serde::{ConvertError, EntryPart, ErrorKind, SerdeDriver};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
struct Player {
    id: String,
    score: u32,
}

impl_reflect_opaque!(Player);

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
struct Coord {
    x: i32,
    y: i32,
}

impl_reflect_opaque!(Coord: Hash);

fn json(text: &str) -> Data {
    serde_json::from_str(text).unwrap()
}

fn registry_with<T: GetTypeMeta>() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<T>();
    registry
}

/// Registers the map `M` whose key or value type `T` goes through serde.
fn registry_with_serde<M, T>() -> TypeRegistry
where
    M: Reflect + Typed + Default,
    T: Reflect + Typed + Default + Serialize + DeserializeOwned,
{
    let mut registry = TypeRegistry::new();
    registry.register_serde::<T>();

    let mut meta = TypeMeta::with_capacity::<M>(1);
    meta.insert_trait::<TypeTraitDefault>(FromType::<M>::from_type());
    registry.insert_type_meta(meta);
    registry
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn string_keys_round_trip() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([(String::from("A"), 1), (String::from("B"), 2)]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data,
        json(r#"[{"Key":"A","Value":1},{"Key":"B","Value":2}]"#)
    );

    let back: BTreeMap<String, i32> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

#[test]
fn empty_map_is_empty_list() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let data = driver.serialize_value(&BTreeMap::<String, i32>::new()).unwrap();
    assert_eq!(data, Data::List(Vec::new()));

    let back: BTreeMap<String, i32> = driver.deserialize_value(&data).unwrap();
    assert!(back.is_empty());
}

#[test]
fn integer_keys_round_trip() {
    let registry = registry_with::<HashMap<u64, String>>();
    let driver = SerdeDriver::new(&registry);

    let map = HashMap::from([(7_u64, String::from("seven"))]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(data.to_string(), r#"[{"Key":7,"Value":"seven"}]"#);

    let back: HashMap<u64, String> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

#[test]
fn struct_keys_round_trip() {
    let registry = registry_with_serde::<BTreeMap<Coord, String>, Coord>();
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([
        (Coord { x: 0, y: 1 }, String::from("spawn")),
        (Coord { x: 4, y: -2 }, String::from("chest")),
    ]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data.to_string(),
        r#"[{"Key":{"x":0,"y":1},"Value":"spawn"},{"Key":{"x":4,"y":-2},"Value":"chest"}]"#
    );

    let back: BTreeMap<Coord, String> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

#[test]
fn nested_maps_round_trip() {
    let registry = registry_with::<BTreeMap<String, BTreeMap<u8, bool>>>();
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([(String::from("flags"), BTreeMap::from([(1_u8, true)]))]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data.to_string(),
        r#"[{"Key":"flags","Value":[{"Key":1,"Value":true}]}]"#
    );

    let back: BTreeMap<String, BTreeMap<u8, bool>> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

#[test]
fn dynamic_map_records_element_types() {
    let registry = registry_with::<DynamicMap>();
    let driver = SerdeDriver::new(&registry);

    let mut map = DynamicMap::new();
    map.insert(String::from("hp"), 10_i32).unwrap();

    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data.to_string(),
        r#"[{"Key":{"$type":"alloc::string::String","$content":"hp"},"Value":{"$type":"i32","$content":10}}]"#
    );

    let back: DynamicMap = driver.deserialize_value(&data).unwrap();
    assert_eq!(back.reflect_eq(&map), Some(true));
    assert_eq!(back.get(&String::from("hp")).unwrap().downcast_ref::<i32>(), Some(&10));
}

#[test]
fn json_text_round_trip() {
    let registry = registry_with::<BTreeMap<i64, String>>();
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([(-1_i64, String::from("neg")), (2, String::from("pos"))]);
    let data = driver.serialize_value(&map).unwrap();

    let text = serde_json::to_string(&data).unwrap();
    assert_eq!(text, r#"[{"Key":-1,"Value":"neg"},{"Key":2,"Value":"pos"}]"#);

    let back: BTreeMap<i64, String> = driver.deserialize_value(&json(&text)).unwrap();
    assert_eq!(back, map);
}

#[test]
fn unsuffixed_entries_serialize_through_map_type() {
    let registry = registry_with::<BTreeMap<u32, bool>>();
    let driver = SerdeDriver::new(&registry);

    let map: BTreeMap<u32, bool> = BTreeMap::from([(1, true), (2, false)]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data.to_string(),
        r#"[{"Key":1,"Value":true},{"Key":2,"Value":false}]"#
    );
}

#[test]
fn unregistered_key_type_is_rejected() {
    let registry = registry_with::<BTreeMap<u16, String>>();
    let driver = SerdeDriver::new(&registry);

    // An `i32` literal names a different, unregistered map type.
    let map = BTreeMap::from([(80_i32, String::from("http"))]);
    let err = driver.serialize_value(&map).unwrap_err();
    assert!(matches!(err, ConvertError::UnregisteredType { .. }));

    let map = BTreeMap::from([(80_u16, String::from("http"))]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(data.to_string(), r#"[{"Key":80,"Value":"http"}]"#);
}

// -----------------------------------------------------------------------------
// Identifier field

#[test]
fn identifier_field_is_stripped_and_injected() {
    let mut registry = registry_with_serde::<BTreeMap<String, Player>, Player>();
    assert!(registry.set_identifier_field::<Player>("id"));
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([(
        String::from("X"),
        Player {
            id: String::from("X"),
            score: 7,
        },
    )]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(data.to_string(), r#"[{"Key":"X","Value":{"score":7}}]"#);

    let back: BTreeMap<String, Player> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

#[test]
fn injected_identifier_overrides_value_field() {
    let mut registry = registry_with_serde::<BTreeMap<String, Player>, Player>();
    registry.set_identifier_field::<Player>("id");
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":"Y","Value":{"id":"stale","score":1}}]"#);
    let back: BTreeMap<String, Player> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back["Y"].id, "Y");
}

#[test]
fn identifier_field_does_not_touch_input() {
    let mut registry = registry_with_serde::<BTreeMap<String, Player>, Player>();
    registry.set_identifier_field::<Player>("id");
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":"Z","Value":{"score":3}}]"#);
    let before = data.clone();
    let _: BTreeMap<String, Player> = driver.deserialize_value(&data).unwrap();
    assert_eq!(data, before);
}

#[test]
fn identifier_field_ignores_non_field_map_values() {
    let mut registry = registry_with::<BTreeMap<String, String>>();
    registry.set_identifier_field::<String>("id");
    let driver = SerdeDriver::new(&registry);

    let map = BTreeMap::from([(String::from("k"), String::from("v"))]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(data.to_string(), r#"[{"Key":"k","Value":"v"}]"#);

    let back: BTreeMap<String, String> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}

// -----------------------------------------------------------------------------
// Failures

#[test]
fn non_list_input_is_type_mismatch() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let err = driver
        .deserialize_value::<BTreeMap<String, i32>>(&Data::from(5_i64))
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::TypeMismatch {
            index: None,
            expected: DataKind::List,
            found: DataKind::Number,
        }
    ));
}

#[test]
fn non_field_map_record_is_type_mismatch() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let err = driver
        .deserialize_value::<BTreeMap<String, i32>>(&json(r#"[{"Key":"A","Value":1},3]"#))
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::TypeMismatch {
            index: Some(1),
            expected: DataKind::FieldMap,
            ..
        }
    ));
}

#[test]
fn missing_value_field() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let err = driver
        .deserialize_value::<BTreeMap<String, i32>>(&json(r#"[{"Key":"A"}]"#))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
    assert_eq!(err.to_string(), "entry 0: missing field `Value`");
}

#[test]
fn field_names_are_case_sensitive() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let err = driver
        .deserialize_value::<BTreeMap<String, i32>>(&json(r#"[{"key":"A","value":1}]"#))
        .unwrap_err();
    assert!(matches!(err, ConvertError::MissingField { index: Some(0), .. }));
}

#[test]
fn duplicate_key_keeps_first_entry() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":"a","Value":1},{"Key":"a","Value":2}]"#);
    let mut map = BTreeMap::<String, i32>::new();
    let err = driver.deserialize_into(&data, &mut map).unwrap_err();

    let ConvertError::DuplicateKey { index, key } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(*index, 1);
    assert_eq!(key, r#""a""#);
    assert_eq!(map, BTreeMap::from([(String::from("a"), 1)]));
}

#[test]
fn null_value_is_rejected() {
    let registry = registry_with::<HashMap<String, Option<i32>>>();
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":"a","Value":3},{"Key":"b","Value":null}]"#);
    let mut map = HashMap::<String, Option<i32>>::new();
    let err = driver.deserialize_into(&data, &mut map).unwrap_err();

    assert!(matches!(err, ConvertError::NullKeyOrValue { index: 1 }));
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"], Some(3));
}

#[test]
fn null_key_is_rejected() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":null,"Value":1}]"#);
    let mut map = BTreeMap::<String, i32>::new();
    let err = driver.deserialize_into(&data, &mut map).unwrap_err();

    assert!(matches!(err, ConvertError::NullKeyOrValue { index: 0 }));
    assert!(map.is_empty());
}

#[test]
fn nested_failures_name_the_entry() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::new(&registry);

    let data = json(r#"[{"Key":"a","Value":1},{"Key":"b","Value":"oops"}]"#);
    let err = driver
        .deserialize_value::<BTreeMap<String, i32>>(&data)
        .unwrap_err();

    let ConvertError::Entry { index, part, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!((*index, *part), (1, EntryPart::Value));
    assert_eq!(err.kind(), ErrorKind::Propagated);
    assert!(matches!(err.root_cause(), ConvertError::Data(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn unregistered_map_is_rejected() {
    let registry = TypeRegistry::new();
    let driver = SerdeDriver::new(&registry);

    let err = driver
        .serialize_value(&BTreeMap::<String, i32>::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::UnregisteredType { .. }));
}

#[test]
fn maps_need_a_converter() {
    let registry = registry_with::<BTreeMap<String, i32>>();
    let driver = SerdeDriver::empty(&registry);

    let err = driver
        .serialize_value(&BTreeMap::<String, i32>::new())
        .unwrap_err();
    assert!(matches!(err, ConvertError::NoConverter { .. }));
}

// -----------------------------------------------------------------------------
// Converter priority

/// Writes `bool` as `"yes"` / `"no"`.
struct YesNo;

impl kv_reflect::serde::Converter for YesNo {
    fn can_process(&self, meta: &TypeMeta) -> bool {
        meta.ty().is::<bool>()
    }

    fn try_serialize(
        &self,
        value: &dyn Reflect,
        _meta: &TypeMeta,
        _dispatcher: &dyn kv_reflect::serde::Dispatcher,
    ) -> Result<Data, ConvertError> {
        let yes = value.downcast_ref::<bool>().copied().unwrap_or_default();
        Ok(Data::from(if yes { "yes" } else { "no" }))
    }

    fn try_deserialize(
        &self,
        data: &Data,
        instance: &mut dyn Reflect,
        _meta: &TypeMeta,
        _dispatcher: &dyn kv_reflect::serde::Dispatcher,
    ) -> Result<(), ConvertError> {
        if let Some(value) = instance.downcast_mut::<bool>() {
            *value = data.as_str() == Some("yes");
        }
        Ok(())
    }
}

#[test]
fn converters_take_priority_over_serde() {
    let registry = registry_with::<BTreeMap<u8, bool>>();
    let driver = SerdeDriver::new(&registry).with_converter(YesNo);

    let map = BTreeMap::from([(1_u8, true), (2, false)]);
    let data = driver.serialize_value(&map).unwrap();
    assert_eq!(
        data.to_string(),
        r#"[{"Key":1,"Value":"yes"},{"Key":2,"Value":"no"}]"#
    );

    let back: BTreeMap<u8, bool> = driver.deserialize_value(&data).unwrap();
    assert_eq!(back, map);
}
