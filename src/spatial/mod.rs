//! Spatial indexing for proximity search.
//!
//! Builds an R-tree over record positions so `nearby` can prefilter
//! candidates by bounding box instead of scanning every record.

mod index;

pub use index::{IndexedPosition, ProximityIndex};
