use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::data::{DataError, DataKind};
use crate::ops::MapInsertError;

// -----------------------------------------------------------------------------
// EntryPart

/// The half of a map entry a nested failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPart {
    Key,
    Value,
}

impl fmt::Display for EntryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.pad("key"),
            Self::Value => f.pad("value"),
        }
    }
}

// -----------------------------------------------------------------------------
// ErrorKind

/// The category of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A data node has the wrong kind.
    TypeMismatch,
    /// A required field is missing from a field-map.
    MissingField,
    /// A map key or value deserialized to nothing.
    NullKeyOrValue,
    /// Two records carry equal keys.
    DuplicateKey,
    /// A nested key or value conversion failed.
    Propagated,
    /// Registry, dispatch or data failures.
    Other,
}

// -----------------------------------------------------------------------------
// ConvertError

fn at(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!("entry {index}: "),
        None => String::new(),
    }
}

/// An error produced while converting between reflected values and [`Data`].
///
/// Conversion stops at the first failure. Failures of a nested key or value
/// are wrapped in [`ConvertError::Entry`], once per map level, so the path to
/// the failing entry can be read from the chain of sources.
///
/// [`Data`]: crate::data::Data
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{}expected {expected}, found {found}", at(.index))]
    TypeMismatch {
        /// The record index, or `None` for the input node itself.
        index: Option<usize>,
        expected: DataKind,
        found: DataKind,
    },
    #[error("{}missing field `{field}`", at(.index))]
    MissingField {
        index: Option<usize>,
        field: Cow<'static, str>,
    },
    #[error("entry {index}: key or value is null")]
    NullKeyOrValue { index: usize },
    #[error("entry {index}: duplicate key {key}")]
    DuplicateKey {
        index: usize,
        /// The key as written in the input data.
        key: String,
    },
    #[error("entry {index}: cannot convert {part}")]
    Entry {
        index: usize,
        part: EntryPart,
        #[source]
        source: Box<ConvertError>,
    },
    #[error("type `{type_path}` is not registered")]
    UnregisteredType { type_path: &'static str },
    #[error("no registered type has the path `{type_path}`")]
    UnregisteredTypePath { type_path: String },
    #[error("expected a value of type `{expected}`, found `{found}`")]
    ElementTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("type `{type_path}` has neither a converter nor serde support")]
    NoConverter { type_path: &'static str },
    #[error("type `{type_path}` has no instance factory")]
    NoInstanceFactory { type_path: &'static str },
    #[error("type `{type_path}` is not a map")]
    NotAMap { type_path: &'static str },
    #[error("expected a value of type `{type_path}`, found null")]
    Absent { type_path: &'static str },
    #[error(transparent)]
    Insert(#[from] MapInsertError),
    #[error(transparent)]
    Data(#[from] DataError),
}

impl ConvertError {
    /// Wraps a nested failure of entry `index`.
    #[inline]
    pub fn entry(index: usize, part: EntryPart, source: ConvertError) -> Self {
        Self::Entry {
            index,
            part,
            source: Box::new(source),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::NullKeyOrValue { .. } => ErrorKind::NullKeyOrValue,
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::Entry { .. } => ErrorKind::Propagated,
            _ => ErrorKind::Other,
        }
    }

    /// Returns the innermost error below any [`ConvertError::Entry`] layers.
    pub fn root_cause(&self) -> &ConvertError {
        let mut error = self;
        while let Self::Entry { source, .. } = error {
            error = source;
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ConvertError, EntryPart, ErrorKind};
    use crate::data::DataKind;

    #[test]
    fn messages_name_the_entry() {
        let error = ConvertError::TypeMismatch {
            index: None,
            expected: DataKind::List,
            found: DataKind::Number,
        };
        assert_eq!(error.to_string(), "expected List, found Number");

        let error = ConvertError::MissingField {
            index: Some(2),
            field: "Value".into(),
        };
        assert_eq!(error.to_string(), "entry 2: missing field `Value`");
    }

    #[test]
    fn root_cause_skips_entry_layers() {
        let inner = ConvertError::NullKeyOrValue { index: 0 };
        let error = ConvertError::entry(
            3,
            EntryPart::Value,
            ConvertError::entry(1, EntryPart::Key, inner),
        );

        assert_eq!(error.kind(), ErrorKind::Propagated);
        assert_eq!(error.root_cause().kind(), ErrorKind::NullKeyOrValue);
        assert_eq!(error.to_string(), "entry 3: cannot convert value");
    }
}
