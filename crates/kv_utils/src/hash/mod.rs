//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! All containers default to [`FixedHashState`], so iteration order of a
//! container only depends on its contents and insertion history.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

pub use hashbrown::HashTable;

/// Re-export of the [`hashbrown::hash_table`] iterators.
pub mod hash_table {
    pub use hashbrown::hash_table::{IntoIter, Iter};
}

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
