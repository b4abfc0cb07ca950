use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

/// Error raised while converting between a `serde` value and a [`Data`] tree.
///
/// [`Data`]: crate::data::Data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataError {
    message: String,
}

impl DataError {
    /// Creates an error with the given message.
    pub fn new(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl serde_core::ser::Error for DataError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::new(msg)
    }
}

impl serde_core::de::Error for DataError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::new(msg)
    }
}
