use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use super::FieldMap;

// -----------------------------------------------------------------------------
// DataKind

/// The tag of a [`Data`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Null,
    Bool,
    Number,
    String,
    List,
    FieldMap,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataKind::Null => "Null",
            DataKind::Bool => "Bool",
            DataKind::Number => "Number",
            DataKind::String => "String",
            DataKind::List => "List",
            DataKind::FieldMap => "FieldMap",
        })
    }
}

// -----------------------------------------------------------------------------
// Number

/// A numeric [`Data`] node.
///
/// Unsigned integers that fit in `i64` are always stored as [`Number::Int`],
/// so equal integers compare equal regardless of their source type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Creates a number from an unsigned integer.
    #[inline]
    pub const fn from_u64(v: u64) -> Self {
        if v <= i64::MAX as u64 {
            Number::Int(v as i64)
        } else {
            Number::UInt(v)
        }
    }

    /// Returns the value as `i64` if it is an integer in range.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(v) => Some(v),
            Number::UInt(_) | Number::Float(_) => None,
        }
    }

    /// Returns the value as `f64`, possibly losing precision.
    #[inline]
    pub const fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::UInt(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v:?}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Data

/// A node of the generic data tree.
///
/// The tree is owned by whoever created it. Converters build fresh trees on
/// serialization and only read trees on deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Data>),
    FieldMap(FieldMap),
}

impl Data {
    /// Returns the tag of this node.
    pub const fn kind(&self) -> DataKind {
        match self {
            Data::Null => DataKind::Null,
            Data::Bool(_) => DataKind::Bool,
            Data::Number(_) => DataKind::Number,
            Data::String(_) => DataKind::String,
            Data::List(_) => DataKind::List,
            Data::FieldMap(_) => DataKind::FieldMap,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }

    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, Data::List(_))
    }

    #[inline]
    pub const fn is_field_map(&self) -> bool {
        matches!(self, Data::FieldMap(_))
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_field_map(&self) -> Option<&FieldMap> {
        match self {
            Data::FieldMap(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_field_map_mut(&mut self) -> Option<&mut FieldMap> {
        match self {
            Data::FieldMap(map) => Some(map),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Data {
    #[inline]
    fn from(v: bool) -> Self {
        Data::Bool(v)
    }
}

impl From<i64> for Data {
    #[inline]
    fn from(v: i64) -> Self {
        Data::Number(Number::Int(v))
    }
}

impl From<u64> for Data {
    #[inline]
    fn from(v: u64) -> Self {
        Data::Number(Number::from_u64(v))
    }
}

impl From<f64> for Data {
    #[inline]
    fn from(v: f64) -> Self {
        Data::Number(Number::Float(v))
    }
}

impl From<&str> for Data {
    #[inline]
    fn from(v: &str) -> Self {
        Data::String(v.into())
    }
}

impl From<String> for Data {
    #[inline]
    fn from(v: String) -> Self {
        Data::String(v)
    }
}

impl From<Vec<Data>> for Data {
    #[inline]
    fn from(v: Vec<Data>) -> Self {
        Data::List(v)
    }
}

impl From<FieldMap> for Data {
    #[inline]
    fn from(v: FieldMap) -> Self {
        Data::FieldMap(v)
    }
}

// -----------------------------------------------------------------------------
// Display

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Compact JSON-like text, used in error messages and logs.
impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Null => f.write_str("null"),
            Data::Bool(v) => write!(f, "{v}"),
            Data::Number(v) => write!(f, "{v}"),
            Data::String(v) => write_escaped(f, v),
            Data::List(list) => {
                f.write_char('[')?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Data::FieldMap(map) => {
                f.write_char('{')?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_char(',')?;
                    }
                    write_escaped(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{Data, DataKind, Number};
    use crate::data::FieldMap;

    #[test]
    fn unsigned_normalises_to_int() {
        assert_eq!(Data::from(7_u64), Data::from(7_i64));
        assert_eq!(Number::from_u64(u64::MAX), Number::UInt(u64::MAX));
    }

    #[test]
    fn display_escapes_strings() {
        let mut map = FieldMap::new();
        map.insert("q\"", Data::from("a\\b\n"));
        let data = Data::List(vec![Data::FieldMap(map), Data::Null, Data::from(1.5)]);
        assert_eq!(data.to_string(), r#"[{"q\"":"a\\b\n"},null,1.5]"#);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(Data::Null.kind(), DataKind::Null);
        assert_eq!(Data::List(vec![]).kind(), DataKind::List);
        assert_eq!(DataKind::FieldMap.to_string(), "FieldMap");
    }
}
