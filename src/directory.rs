//! Loaded dataset plus the query surface bound to it.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dataset::{Dataset, LoadPolicy, LoadReport};
use crate::error::{LoadError, PincodeError};
use crate::lookup::{self, anchor, nearby_linear};
use crate::models::{Coordinates, Pincode, Record};
use crate::spatial::ProximityIndex;

/// Outcome of loading the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetStatus {
    /// Loaded; the report accounts for every line
    Ready(LoadReport),
    /// The resource could not be read. The dataset is empty.
    Unavailable(String),
}

/// Pincode lookups against one immutable dataset.
///
/// Built once, then shared freely: every query is a read-only scan of the
/// same records, so `Pincodes` is `Send + Sync` and clones share storage.
#[derive(Clone)]
pub struct Pincodes {
    dataset: Dataset,
    index: Option<Arc<ProximityIndex>>,
    status: DatasetStatus,
}

impl Pincodes {
    /// Wrap an already loaded dataset
    pub fn new(dataset: Dataset) -> Self {
        let report = LoadReport {
            admitted: dataset.len(),
            ..LoadReport::default()
        };
        Self {
            dataset,
            index: None,
            status: DatasetStatus::Ready(report),
        }
    }

    /// Load a dataset file, failing on I/O errors (and bad lines under
    /// [`LoadPolicy::Strict`]).
    pub fn load(path: &Path, policy: LoadPolicy) -> Result<Self, LoadError> {
        let (dataset, report) = Dataset::load(path, policy)?;
        Ok(Self {
            dataset,
            index: None,
            status: DatasetStatus::Ready(report),
        })
    }

    /// Load a dataset file, degrading to an empty dataset on failure.
    ///
    /// The failure is logged and recorded in [`Pincodes::status`]; queries
    /// against the empty dataset then report "not found" rather than erroring.
    pub fn open(path: &Path, policy: LoadPolicy) -> Self {
        match Self::load(path, policy) {
            Ok(pincodes) => pincodes,
            Err(e) => {
                error!("Could not load pincode data: {}", e);
                Self {
                    dataset: Dataset::empty(),
                    index: None,
                    status: DatasetStatus::Unavailable(e.to_string()),
                }
            }
        }
    }

    /// Build the spatial index used by [`Pincodes::nearby`].
    pub fn with_spatial_index(mut self) -> Self {
        self.index = Some(Arc::new(ProximityIndex::build(&self.dataset)));
        self
    }

    pub fn status(&self) -> &DatasetStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, DatasetStatus::Ready(_))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn matching(&self, code: &str) -> Result<Vec<&Record>, PincodeError> {
        lookup::matching(code, &self.dataset)
    }

    pub fn is_valid(&self, code: &str) -> Result<bool, PincodeError> {
        lookup::is_valid(code, &self.dataset)
    }

    pub fn district_match(&self, code: &str) -> Result<String, PincodeError> {
        lookup::district_match(code, &self.dataset)
    }

    pub fn coordinates(&self, code: &str) -> Result<BTreeMap<String, Coordinates>, PincodeError> {
        lookup::coordinates(code, &self.dataset)
    }

    /// Same result as [`lookup::nearby`], served from the spatial index when
    /// one has been built.
    pub fn nearby(&self, code: &str, max_diff: f64) -> Result<Vec<String>, PincodeError> {
        let code = Pincode::parse(code)?;

        let Some(index) = &self.index else {
            return Ok(nearby_linear(&code, max_diff, &self.dataset));
        };

        let Some(center) = anchor(&code, &self.dataset) else {
            debug!("No anchor for {}", code);
            return Ok(Vec::new());
        };

        match index.within(center, max_diff, &code) {
            Some(found) => Ok(found),
            None => {
                info!("Threshold {} not indexable, scanning", max_diff);
                Ok(nearby_linear(&code, max_diff, &self.dataset))
            }
        }
    }
}
