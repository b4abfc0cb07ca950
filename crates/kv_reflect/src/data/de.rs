use alloc::format;

use serde_core::Deserialize;
use serde_core::de::{self, DeserializeSeed, IntoDeserializer, Visitor};
use serde_core::forward_to_deserialize_any;

use super::{Data, DataError, FieldMap, Number};

/// Deserializes a `serde` value from a [`Data`] tree.
///
/// The mapping mirrors [`to_data`](super::to_data): `Null` deserializes as
/// `None` or unit, a single-field field-map or a string selects an enum
/// variant.
///
/// # Examples
///
/// ```
/// use kv_reflect::data::{from_data, Data};
///
/// let data = Data::List(vec![Data::from(1_i64), Data::from(2_i64)]);
/// let v: Vec<u16> = from_data(&data).unwrap();
/// assert_eq!(v, [1, 2]);
/// ```
pub fn from_data<'de, T: Deserialize<'de>>(data: &'de Data) -> Result<T, DataError> {
    T::deserialize(data)
}

fn invalid_type(data: &Data, exp: &dyn de::Expected) -> DataError {
    let unexpected = match data {
        Data::Null => de::Unexpected::Unit,
        Data::Bool(v) => de::Unexpected::Bool(*v),
        Data::Number(Number::Int(v)) => de::Unexpected::Signed(*v),
        Data::Number(Number::UInt(v)) => de::Unexpected::Unsigned(*v),
        Data::Number(Number::Float(v)) => de::Unexpected::Float(*v),
        Data::String(v) => de::Unexpected::Str(v),
        Data::List(_) => de::Unexpected::Seq,
        Data::FieldMap(_) => de::Unexpected::Map,
    };
    de::Error::invalid_type(unexpected, exp)
}

impl<'de> de::Deserializer<'de> for &'de Data {
    type Error = DataError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        match self {
            Data::Null => visitor.visit_unit(),
            Data::Bool(v) => visitor.visit_bool(*v),
            Data::Number(Number::Int(v)) => visitor.visit_i64(*v),
            Data::Number(Number::UInt(v)) => visitor.visit_u64(*v),
            Data::Number(Number::Float(v)) => visitor.visit_f64(*v),
            Data::String(v) => visitor.visit_borrowed_str(v),
            Data::List(list) => {
                let mut seq = SeqDeserializer {
                    iter: list.iter(),
                };
                let value = visitor.visit_seq(&mut seq)?;
                match seq.iter.len() {
                    0 => Ok(value),
                    remaining => Err(de::Error::invalid_length(
                        list.len() - remaining,
                        &"fewer elements in list",
                    )),
                }
            }
            Data::FieldMap(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        match self {
            Data::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DataError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DataError> {
        match self {
            Data::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                content: None,
            }),
            Data::FieldMap(map) if map.len() == 1 => {
                let Some((variant, content)) = map.iter().next() else {
                    return Err(invalid_type(self, &"enum variant"));
                };
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    content: Some(content),
                })
            }
            _ => Err(invalid_type(self, &"string or single-field map for an enum")),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        match self {
            Data::Null => visitor.visit_unit(),
            _ => Err(invalid_type(self, &"null")),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DataError> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map struct identifier
    }
}

// -----------------------------------------------------------------------------
// Sequences

struct SeqDeserializer<'de> {
    iter: core::slice::Iter<'de, Data>,
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = DataError;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, DataError> {
        match self.iter.next() {
            Some(item) => seed.deserialize(item).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

// -----------------------------------------------------------------------------
// Field-maps

struct MapDeserializer<'de> {
    iter: alloc::boxed::Box<dyn ExactSizeIterator<Item = (&'de str, &'de Data)> + 'de>,
    value: Option<&'de Data>,
}

impl<'de> MapDeserializer<'de> {
    fn new(map: &'de FieldMap) -> Self {
        Self {
            iter: alloc::boxed::Box::new(map.iter()),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer<'de> {
    type Error = DataError;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, DataError> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(FieldName(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, DataError> {
        match self.value.take() {
            Some(value) => seed.deserialize(value),
            None => Err(de::Error::custom("map value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// A field name used as a `serde` map key.
///
/// Numeric and boolean key types parse the name, so maps with non-string
/// keys survive a trip through a field-map.
struct FieldName<'de>(&'de str);

impl<'de> FieldName<'de> {
    fn parse<T: core::str::FromStr>(&self, exp: &'static str) -> Result<T, DataError> {
        self.0
            .parse()
            .map_err(|_| DataError::new(format!("invalid {exp} field name `{}`", self.0)))
    }
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident : $ty:ty,)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for FieldName<'de> {
    type Error = DataError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        visitor.visit_borrowed_str(self.0)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, DataError> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, DataError> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DataError> {
        visitor.visit_enum(self.0.into_deserializer())
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

// -----------------------------------------------------------------------------
// Enums

struct EnumDeserializer<'de> {
    variant: &'de str,
    content: Option<&'de Data>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = DataError;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), DataError> {
        let variant = seed.deserialize(FieldName(self.variant))?;
        Ok((
            variant,
            VariantDeserializer {
                content: self.content,
            },
        ))
    }
}

struct VariantDeserializer<'de> {
    content: Option<&'de Data>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = DataError;

    fn unit_variant(self) -> Result<(), DataError> {
        match self.content {
            None | Some(Data::Null) => Ok(()),
            Some(other) => Err(invalid_type(other, &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, DataError> {
        match self.content {
            Some(content) => seed.deserialize(content),
            None => Err(de::Error::invalid_type(
                de::Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, DataError> {
        match self.content {
            Some(content @ Data::List(_)) => de::Deserializer::deserialize_any(content, visitor),
            Some(other) => Err(invalid_type(other, &"tuple variant")),
            None => Err(de::Error::invalid_type(
                de::Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, DataError> {
        match self.content {
            Some(content @ Data::FieldMap(_)) => de::Deserializer::deserialize_any(content, visitor),
            Some(other) => Err(invalid_type(other, &"struct variant")),
            None => Err(de::Error::invalid_type(
                de::Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde::Deserialize;

    use super::from_data;
    use crate::data::{Data, to_data};

    #[derive(Deserialize, serde::Serialize, Debug, PartialEq)]
    struct Player {
        id: String,
        score: i32,
        #[serde(default)]
        nick: Option<String>,
    }

    #[derive(Deserialize, serde::Serialize, Debug, PartialEq)]
    enum Shape {
        Dot,
        Circle(f64),
        Pair(u8, u8),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn struct_from_field_map() {
        let data: Data = serde_json::from_str(r#"{"score":7,"id":"X"}"#).unwrap();
        let player: Player = from_data(&data).unwrap();
        assert_eq!(
            player,
            Player {
                id: "X".into(),
                score: 7,
                nick: None
            }
        );
    }

    #[test]
    fn enums_follow_to_data() {
        for shape in [
            Shape::Dot,
            Shape::Circle(2.0),
            Shape::Pair(1, 2),
            Shape::Rect { w: 3, h: 4 },
        ] {
            let data = to_data(&shape).unwrap();
            assert_eq!(from_data::<Shape>(&data).unwrap(), shape);
        }
    }

    #[test]
    fn numeric_field_names_parse() {
        let data: Data = serde_json::from_str(r#"{"1":true,"20":false}"#).unwrap();
        let map: std::collections::BTreeMap<u32, bool> = from_data(&data).unwrap();
        assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![(1, true), (20, false)]);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let err = from_data::<Vec<i32>>(&Data::from("nope")).unwrap_err();
        assert!(err.message().contains("invalid type"));
        assert!(from_data::<(u8, u8)>(&Data::List(vec![Data::from(1_i64)])).is_err());
    }

    #[test]
    fn null_is_none() {
        assert_eq!(from_data::<Option<u8>>(&Data::Null).unwrap(), None);
        assert_eq!(from_data::<Option<u8>>(&Data::from(3_i64)).unwrap(), Some(3));
    }
}
