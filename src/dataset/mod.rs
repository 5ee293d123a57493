//! Immutable in-memory pincode dataset.
//!
//! Records are loaded once from a line-delimited JSON resource and never
//! mutated afterwards. The backing storage is an `Arc<[Record]>`, so a
//! `Dataset` is cheap to clone and safe to share between threads.

mod loader;

use std::io::Read;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

pub use loader::{load_records, open_resource, read_records, LoadPolicy, LoadReport};

use crate::error::LoadError;
use crate::models::Record;

/// Ordered, immutable sequence of records.
///
/// Duplicate codes (several post offices sharing one pincode) are kept as
/// separate records in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// An empty dataset
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Load from a file (`.gz` and `.bz2` are decompressed).
    pub fn load(path: &Path, policy: LoadPolicy) -> Result<(Self, LoadReport), LoadError> {
        let (records, report) = load_records(path, policy)?;
        Ok((Self::from(records), report))
    }

    /// Load from an already opened, uncompressed reader.
    pub fn from_reader<R: Read>(reader: R, policy: LoadPolicy) -> Result<(Self, LoadReport), LoadError> {
        let (records, report) = read_records(reader, policy, Path::new("<reader>"))?;
        Ok((Self::from(records), report))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}
