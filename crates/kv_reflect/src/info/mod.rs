//! Provide type information used to pick converters and element types.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` paired with the type's path, 32 bytes, `Copy`.
//! - [`ElementType`]: the declared type of a map key or value, either a
//!   concrete [`Type`] or [`ElementType::Any`] when only the runtime value
//!   knows its type.
//! - [`MapTypes`]: the key/value element types of a map type.
//! - [`TypeInfo`]: what the reflection system knows about a type:
//!     - [`MapInfo`]: map-like types (e.g. `HashMap<K, V>`), including [`MapTypes`].
//!     - [`OpaqueInfo`]: everything else; such types are (de)serialized through `serde`.
//! - [`Typed`]: a trait for obtaining `TypeInfo` from a type.
//!
//! Type paths come from [`core::any::type_name`]. They identify types within
//! one build of a program and should not be persisted across compiler versions.

// -----------------------------------------------------------------------------
// Modules

mod map_info;
mod ty;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use map_info::{ElementType, MapInfo, MapTypes};
pub use ty::Type;
pub use type_info::{OpaqueInfo, ReflectKind, TypeInfo, Typed};
