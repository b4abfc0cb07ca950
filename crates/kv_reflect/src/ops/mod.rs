//! Provide interfaces and dynamic types for data operation.
//!
//! ## Menu
//!
//! - [`ReflectRef`] / [`ReflectMut`]: the "kind" of a reflected value,
//!   obtained from [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`].
//! - [`Map`]: a subtrait of [`Reflect`] for map-like types (e.g. `HashMap<i32, f32>`).
//!   Keys may be of any reflected type, not only strings.
//! - [`DynamicMap`]: a map of `Box<dyn Reflect>` keys and values whose element
//!   types are only known at runtime. Keys are compared through
//!   [`Reflect::reflect_hash`] and [`Reflect::reflect_eq`].
//! - [`MapInsertError`]: the failure of [`Map::try_insert`].
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut
//! [`Reflect::reflect_hash`]: crate::Reflect::reflect_hash
//! [`Reflect::reflect_eq`]: crate::Reflect::reflect_eq

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod map_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use map_ops::{DynamicMap, Map, MapInsertError};
