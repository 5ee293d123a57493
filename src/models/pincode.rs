//! Validated postal code type.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::PincodeError;

/// Number of digits in an Indian postal code.
pub const PINCODE_LENGTH: usize = 6;

/// A validated 6-digit postal code.
///
/// Every query validates its argument into a `Pincode` before scanning the
/// dataset, so an invalid code never reaches a lookup.
///
/// # Examples
///
/// ```
/// use indiapins::models::Pincode;
///
/// let code = Pincode::parse("110001").unwrap();
/// assert_eq!(code.as_str(), "110001");
///
/// // No normalisation: surrounding whitespace counts towards the length
/// assert!(Pincode::parse(" 110001").is_err());
///
/// // Wrong length or non-digits are rejected
/// assert!(Pincode::parse("11001").is_err());
/// assert!(Pincode::parse("11000a").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pincode([u8; PINCODE_LENGTH]);

impl Pincode {
    /// Validate a candidate code. The input is taken as-is.
    pub fn parse(input: &str) -> Result<Self, PincodeError> {
        if input.is_empty() {
            return Err(PincodeError::InvalidType);
        }

        let len = input.chars().count();
        if len != PINCODE_LENGTH {
            return Err(PincodeError::InvalidLength(len));
        }

        let bytes = input.as_bytes();
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(PincodeError::InvalidCharacters);
        }

        let mut digits = [0u8; PINCODE_LENGTH];
        digits.copy_from_slice(bytes);
        Ok(Pincode(digits))
    }

    pub fn as_str(&self) -> &str {
        // parse() only stores ASCII digits, so this never fails
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pincode::parse(s)
    }
}

/// Loosely typed input, e.g. a code pulled out of a JSON request body.
/// Anything other than a non-empty string is a type error.
impl TryFrom<&Value> for Pincode {
    type Error = PincodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Pincode::parse(s),
            _ => Err(PincodeError::InvalidType),
        }
    }
}

impl PartialEq<str> for Pincode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Debug for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pincode({})", self.as_str())
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Pincode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
