//! R-tree over record positions for fast proximity lookups.

use geo::Coord;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::BTreeSet;
use tracing::info;

use crate::lookup::manhattan;
use crate::models::{Pincode, Record};

/// Relative slack added to the query envelope so rounding at the box edge
/// never drops a point that passes the exact distance test.
const ENVELOPE_SLACK: f64 = 1e-9;

/// Wrapper for R-tree indexing of a record position
#[derive(Debug, Clone)]
pub struct IndexedPosition {
    pub code: String,
    pub position: Coord<f64>,
}

impl RTreeObject for IndexedPosition {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

/// Spatial index of every record with finite, numeric coordinates.
///
/// Answers the same question as a full scan of the dataset for any finite,
/// non-negative threshold: the envelope query only prefilters, and each
/// candidate still goes through the exact Manhattan test.
pub struct ProximityIndex {
    tree: RTree<IndexedPosition>,
}

impl ProximityIndex {
    /// Build the index from a record slice
    pub fn build(records: &[Record]) -> Self {
        let indexed: Vec<IndexedPosition> = records
            .iter()
            .filter_map(|r| {
                let position = r.position()?;
                (position.x.is_finite() && position.y.is_finite()).then(|| IndexedPosition {
                    code: r.code().to_string(),
                    position,
                })
            })
            .collect();

        let skipped = records.len() - indexed.len();
        let tree = RTree::bulk_load(indexed);

        info!(
            "Spatial index built with {} positions ({} records without usable coordinates)",
            tree.size(),
            skipped
        );

        Self { tree }
    }

    /// Distinct codes within `max_diff` of `center`, sorted, excluding `exclude`.
    ///
    /// Returns `None` when the threshold or center is not finite; callers
    /// fall back to a full scan in that case.
    pub fn within(
        &self,
        center: Coord<f64>,
        max_diff: f64,
        exclude: &Pincode,
    ) -> Option<Vec<String>> {
        if !max_diff.is_finite() || !center.x.is_finite() || !center.y.is_finite() {
            return None;
        }
        if max_diff < 0.0 {
            return Some(Vec::new());
        }

        let reach = max_diff * (1.0 + ENVELOPE_SLACK) + f64::EPSILON;
        let envelope = AABB::from_corners(
            [center.x - reach, center.y - reach],
            [center.x + reach, center.y + reach],
        );

        let found: BTreeSet<&str> = self
            .tree
            .locate_in_envelope(&envelope)
            .filter(|ip| manhattan(ip.position, center) <= max_diff)
            .map(|ip| ip.code.as_str())
            .filter(|c| *exclude != **c)
            .collect();

        Some(found.into_iter().map(str::to_string).collect())
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
