use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Data, FieldMap, Number};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(v) => serializer.serialize_i64(v),
            Number::UInt(v) => serializer.serialize_u64(v),
            Number::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Null => serializer.serialize_unit(),
            Data::Bool(v) => serializer.serialize_bool(*v),
            Data::Number(v) => v.serialize(serializer),
            Data::String(v) => serializer.serialize_str(v),
            Data::List(list) => {
                let mut state = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Data::FieldMap(map) => map.serialize(serializer),
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct DataVisitor;

impl<'de> Visitor<'de> for DataVisitor {
    type Value = Data;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any data tree value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Data, E> {
        Ok(Data::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Data, E> {
        Ok(Data::Number(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Data, E> {
        Ok(Data::Number(Number::from_u64(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Data, E> {
        Ok(Data::Number(Number::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Data, E> {
        Ok(Data::String(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Data, E> {
        Ok(Data::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Data, E> {
        Ok(Data::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Data, E> {
        Ok(Data::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Data, D::Error> {
        Data::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Data, A::Error> {
        let mut list = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Data>()? {
            list.push(item);
        }
        Ok(Data::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Data, A::Error> {
        let mut fields = FieldMap::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<String, Data>()? {
            fields.insert(key, value);
        }
        Ok(Data::FieldMap(fields))
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DataVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::data::{Data, FieldMap};

    #[test]
    fn json_round_trip_keeps_field_order() {
        let text = r#"[{"Value":{"z":1,"a":[true,null,2.5]},"Key":"A"}]"#;
        let data: Data = serde_json::from_str(text).unwrap();

        let record = data.as_list().unwrap()[0].as_field_map().unwrap();
        assert_eq!(record.keys().collect::<vec::Vec<_>>(), ["Value", "Key"]);
        assert_eq!(serde_json::to_string(&data).unwrap(), text);
    }

    #[test]
    fn ron_round_trip() {
        let mut record = FieldMap::new();
        record.insert("Key", Data::from(1_i64));
        record.insert("Value", Data::from("x"));
        let data = Data::List(vec![Data::FieldMap(record)]);

        let text = ron::to_string(&data).unwrap();
        let back: Data = ron::from_str(&text).unwrap();
        assert_eq!(back, data);
    }
}
