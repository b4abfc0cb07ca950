#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod data;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
}

pub use reflection::{Reflect, reflect_hasher};
