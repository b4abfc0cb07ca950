//! The generic data tree used as the wire representation.
//!
//! [`Data`] is a tagged union of null, boolean, number, string, list and
//! field-map nodes. It is what converters produce and consume; turning a
//! `Data` into text is left to any `serde` format, since `Data` itself
//! implements `Serialize` and `Deserialize`.
//!
//! - [`to_data`]: serialize any `serde::Serialize` value into a `Data`.
//! - [`from_data`]: deserialize any `serde::Deserialize` value from a `&Data`.
//!
//! # Examples
//!
//! ```
//! use kv_reflect::data::{Data, FieldMap};
//!
//! let mut record = FieldMap::new();
//! record.insert("Key", Data::from("A"));
//! record.insert("Value", Data::from(1_i64));
//!
//! let data = Data::List(vec![Data::FieldMap(record)]);
//! assert_eq!(data.to_string(), r#"[{"Key":"A","Value":1}]"#);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod de;
mod error;
mod field_map;
mod ser;
mod serde_impl;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use de::from_data;
pub use error::DataError;
pub use field_map::FieldMap;
pub use ser::{DataSerializer, to_data};
pub use value::{Data, DataKind, Number};
