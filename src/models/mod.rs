//! Core data models for the pincode dataset.

pub mod pincode;
pub mod record;

pub use pincode::{Pincode, PINCODE_LENGTH};
pub use record::{Coordinates, Record, UNKNOWN_NAME};
