//! Indiapins - postal code lookups over a static Indian pincode dataset
//!
//! This library loads the line-delimited pincode dataset once and answers
//! exact-match, district, coordinate and proximity queries against it.

pub mod config;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod lookup;
pub mod models;
pub mod spatial;

pub use dataset::{Dataset, LoadPolicy, LoadReport};
pub use directory::{DatasetStatus, Pincodes};
pub use error::{ErrorKind, LoadError, PincodeError};
pub use models::{Coordinates, Pincode, Record};
