//! Error types for pincode validation, queries and dataset loading.

use std::path::PathBuf;

use crate::models::Pincode;

/// Coarse classification of a [`PincodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The argument was missing or not text
    Type,
    /// Wrong length or non-digit characters
    Format,
    /// No qualifying record for an aggregation
    NotFound,
}

/// Errors raised by the query surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PincodeError {
    /// Empty or non-string input
    #[error("invalid type, pincode must be a non-empty string")]
    InvalidType,

    /// Input is not exactly six characters long
    #[error("invalid format, pincode must be exactly 6 digits (got {0} characters)")]
    InvalidLength(usize),

    /// Input contains something other than ASCII digits
    #[error("invalid characters, pincode may only contain digits")]
    InvalidCharacters,

    /// District aggregation found nothing for the code
    #[error("pincode {0} not found in database")]
    NotFound(Pincode),
}

impl PincodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PincodeError::InvalidType => ErrorKind::Type,
            PincodeError::InvalidLength(_) | PincodeError::InvalidCharacters => ErrorKind::Format,
            PincodeError::NotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Errors raised while reading the line-delimited dataset.
///
/// The structural variants are only produced under [`LoadPolicy::Strict`];
/// the tolerant policy counts those lines and moves on.
///
/// [`LoadPolicy::Strict`]: crate::dataset::LoadPolicy::Strict
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Opening, decompressing or reading the resource failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line is not valid JSON
    #[error("line {line}: malformed record: {message}")]
    Malformed { line: usize, message: String },

    /// Line is valid JSON but not an object
    #[error("line {line}: record is not a JSON object")]
    NotAnObject { line: usize },

    /// Object without a `Pincode` field
    #[error("line {line}: record has no Pincode field")]
    MissingPincode { line: usize },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
