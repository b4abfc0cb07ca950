// -----------------------------------------------------------------------------
// Modules

mod default;
mod deserialize;
mod identifier;
mod serialize;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use deserialize::TypeTraitDeserialize;
pub use identifier::TypeTraitIdentifier;
pub use serialize::TypeTraitSerialize;
