use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_core::Serialize;
use serde_core::ser::{self, Impossible};

use super::{Data, DataError, FieldMap, Number};

/// Serializes any `serde` value into a [`Data`] tree.
///
/// Structs and maps become field-maps, sequences and tuples become lists,
/// unit enum variants become strings and other variants become a single-field
/// field-map keyed by the variant name. Map keys must serialize to a string,
/// a number, a boolean or a char.
///
/// # Examples
///
/// ```
/// use kv_reflect::data::{to_data, Data};
///
/// let data = to_data(&(1_u8, "two")).unwrap();
/// assert_eq!(data, Data::List(vec![Data::from(1_i64), Data::from("two")]));
/// ```
pub fn to_data<T: ?Sized + Serialize>(value: &T) -> Result<Data, DataError> {
    value.serialize(DataSerializer)
}

/// A `serde::Serializer` whose output is a [`Data`] node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSerializer;

fn single_field(name: &'static str, value: Data) -> Data {
    let mut map = FieldMap::with_capacity(1);
    map.insert(name, value);
    Data::FieldMap(map)
}

impl ser::Serializer for DataSerializer {
    type Ok = Data;
    type Error = DataError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeFieldMap;
    type SerializeStruct = SerializeFieldMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Data, DataError> {
        Ok(Data::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Data, DataError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Data, DataError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Data, DataError> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Data, DataError> {
        Ok(Data::Number(Number::Int(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Data, DataError> {
        if let Ok(v) = i64::try_from(v) {
            Ok(Data::Number(Number::Int(v)))
        } else if let Ok(v) = u64::try_from(v) {
            Ok(Data::Number(Number::UInt(v)))
        } else {
            Err(DataError::new("integer out of range for a data number"))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Data, DataError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Data, DataError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Data, DataError> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Data, DataError> {
        Ok(Data::Number(Number::from_u64(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Data, DataError> {
        match u64::try_from(v) {
            Ok(v) => self.serialize_u64(v),
            Err(_) => Err(DataError::new("integer out of range for a data number")),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Data, DataError> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Data, DataError> {
        Ok(Data::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Data, DataError> {
        Ok(Data::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Data, DataError> {
        Ok(Data::String(v.into()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Data, DataError> {
        Ok(Data::List(
            v.iter().map(|b| Data::Number(Number::Int(*b as i64))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Data, DataError> {
        Ok(Data::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Data, DataError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Data, DataError> {
        Ok(Data::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Data, DataError> {
        Ok(Data::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Data, DataError> {
        Ok(Data::String(variant.into()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Data, DataError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Data, DataError> {
        Ok(single_field(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList, DataError> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList, DataError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeList, DataError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, DataError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeFieldMap, DataError> {
        Ok(SerializeFieldMap {
            fields: FieldMap::with_capacity(len.unwrap_or_default()),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeFieldMap, DataError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, DataError> {
        Ok(SerializeStructVariant {
            variant,
            fields: FieldMap::with_capacity(len),
        })
    }
}

// -----------------------------------------------------------------------------
// Compound serializers

#[doc(hidden)]
pub struct SerializeList {
    items: Vec<Data>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Data;
    type Error = DataError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.items.push(value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, DataError> {
        Ok(Data::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Data;
    type Error = DataError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Data, DataError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Data;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Data, DataError> {
        ser::SerializeSeq::end(self)
    }
}

#[doc(hidden)]
pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Data>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Data;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        self.items.push(value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, DataError> {
        Ok(single_field(self.variant, Data::List(self.items)))
    }
}

#[doc(hidden)]
pub struct SerializeFieldMap {
    fields: FieldMap,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeFieldMap {
    type Ok = Data;
    type Error = DataError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), DataError> {
        self.next_key = Some(key.serialize(FieldNameSerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), DataError> {
        let Some(key) = self.next_key.take() else {
            return Err(DataError::new("map value serialized before its key"));
        };
        self.fields.insert(key, value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, DataError> {
        Ok(Data::FieldMap(self.fields))
    }
}

impl ser::SerializeStruct for SerializeFieldMap {
    type Ok = Data;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DataError> {
        self.fields.insert(key, value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, DataError> {
        Ok(Data::FieldMap(self.fields))
    }
}

#[doc(hidden)]
pub struct SerializeStructVariant {
    variant: &'static str,
    fields: FieldMap,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Data;
    type Error = DataError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), DataError> {
        self.fields.insert(key, value.serialize(DataSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Data, DataError> {
        Ok(single_field(self.variant, Data::FieldMap(self.fields)))
    }
}

// -----------------------------------------------------------------------------
// Field names

/// Turns a `serde` map key into a field name.
struct FieldNameSerializer;

fn key_must_be_scalar() -> DataError {
    DataError::new("field-map keys must be strings, numbers, booleans or chars")
}

impl ser::Serializer for FieldNameSerializer {
    type Ok = String;
    type Error = DataError;

    type SerializeSeq = Impossible<String, DataError>;
    type SerializeTuple = Impossible<String, DataError>;
    type SerializeTupleStruct = Impossible<String, DataError>;
    type SerializeTupleVariant = Impossible<String, DataError>;
    type SerializeMap = Impossible<String, DataError>;
    type SerializeStruct = Impossible<String, DataError>;
    type SerializeStructVariant = Impossible<String, DataError>;

    fn serialize_bool(self, v: bool) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String, DataError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, DataError> {
        Ok(v.into())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_none(self) -> Result<String, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, DataError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, DataError> {
        Ok(variant.into())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, DataError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, DataError> {
        Err(key_must_be_scalar())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, DataError> {
        Err(key_must_be_scalar())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use serde::Serialize;

    use super::to_data;
    use crate::data::{Data, FieldMap};

    #[derive(Serialize)]
    struct Player {
        id: String,
        score: i32,
        tags: Vec<&'static str>,
    }

    #[derive(Serialize)]
    enum Shape {
        Dot,
        Circle(f64),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn struct_becomes_ordered_field_map() {
        let player = Player {
            id: "X".into(),
            score: 7,
            tags: vec!["a"],
        };
        let data = to_data(&player).unwrap();
        assert_eq!(data.to_string(), r#"{"id":"X","score":7,"tags":["a"]}"#);
    }

    #[test]
    fn enum_variants() {
        assert_eq!(to_data(&Shape::Dot).unwrap(), Data::from("Dot"));

        let circle = to_data(&Shape::Circle(1.5)).unwrap();
        let expected: FieldMap = [("Circle", Data::from(1.5))].into_iter().collect();
        assert_eq!(circle, Data::FieldMap(expected));

        let rect = to_data(&Shape::Rect { w: 2, h: 3 }).unwrap();
        assert_eq!(rect.to_string(), r#"{"Rect":{"w":2,"h":3}}"#);
    }

    #[test]
    fn numeric_map_keys_become_names() {
        let map: std::collections::BTreeMap<u8, bool> = [(1, true), (2, false)].into();
        assert_eq!(to_data(&map).unwrap().to_string(), r#"{"1":true,"2":false}"#);
    }

    #[test]
    fn list_keys_are_rejected() {
        let map: std::collections::BTreeMap<Vec<u8>, bool> = [(vec![1], true)].into();
        assert!(to_data(&map).is_err());
    }
}
