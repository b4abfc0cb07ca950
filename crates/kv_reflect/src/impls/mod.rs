//! Reflection implementations for standard types.
//!
//! - primitives, `()` and `String`: opaque, (de)serialized through `serde`.
//! - `Option<T>`: opaque, `None` is written as a null node.
//! - `BTreeMap<K, V>`, `hashbrown::HashMap<K, V, S>`, and with the `std`
//!   feature `std::collections::HashMap<K, V, S>`: maps with typed elements.
//! - [`DynamicMap`](crate::ops::DynamicMap): a map with untyped elements.

// -----------------------------------------------------------------------------
// Modules

mod btree_map;
mod dynamic_map;
mod hash_map;
mod native;
mod option;
mod utils;

// -----------------------------------------------------------------------------
// Exports

pub use utils::{map_debug, map_eq};
