//! Convert reflected values to and from the generic [`Data`] tree.
//!
//! ## Menu
//!
//! - [`Converter`]: a pluggable handler for a family of types.
//! - [`DictionaryConverter`]: encodes maps as lists of `{"Key", "Value"}` records.
//! - [`Dispatcher`]: the callback converters use for nested keys and values.
//! - [`SerdeDriver`]: the default dispatcher, backed by a [`TypeRegistry`].
//! - [`TypeResolver`] / [`IdentifierPolicy`]: type questions a dispatcher
//!   answers for converters.
//! - [`ConvertError`]: every failure of a conversion.
//!
//! ## Priority
//!
//! For each value the driver tries, in order:
//!
//! 1. the first installed converter that can process the type,
//! 2. the `serde` type traits registered for the type,
//! 3. and gives up with [`ConvertError::NoConverter`].
//!
//! [`Data`]: crate::data::Data
//! [`TypeRegistry`]: crate::registry::TypeRegistry

// -----------------------------------------------------------------------------
// Modules

mod contract;
mod converter;
mod dictionary;
mod driver;
mod error;

// -----------------------------------------------------------------------------
// Exports

pub use contract::{Dispatcher, IdentifierPolicy, TypeResolver};
pub use converter::Converter;
pub use dictionary::DictionaryConverter;
pub use driver::SerdeDriver;
pub use error::{ConvertError, EntryPart, ErrorKind};
