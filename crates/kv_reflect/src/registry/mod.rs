//! Provide type registry for non-object information querying.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A trait representing a capability supported by a type.
//! - [`FromType`]: A trait providing a function to create a `TypeTrait` from a type.
//! - [`TypeMeta`]: A container including a [`TypeInfo`] and a [`TypeTrait`] table.
//! - [`GetTypeMeta`]: A trait providing a function to create a `TypeMeta` from a type.
//! - [`TypeRegistry`]: A container for storing and querying `TypeMeta`s.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: Provide [`Default`] capability, used as the instance factory of converters.
//!     - [`TypeTraitSerialize`]: Provide `serde` serialization support for reflection type.
//!     - [`TypeTraitDeserialize`]: Provide `serde` deserialization support for reflection type.
//!     - [`TypeTraitIdentifier`]: Name the field of a value type that mirrors its map key.
//!
//! The registry also answers the questions converters ask about types: it
//! implements [`TypeResolver`] and [`IdentifierPolicy`].
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`TypeResolver`]: crate::serde::TypeResolver
//! [`IdentifierPolicy`]: crate::serde::IdentifierPolicy

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitDefault, TypeTraitIdentifier};
pub use traits::{TypeTraitDeserialize, TypeTraitSerialize};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
