//! Spatial index over projected district centroids.
//!
//! Answers the window-subset query behind the outline map with an R-tree
//! instead of a linear scan.

use geo::Centroid;
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::EnrichedDistrict;

/// Rectangular selection window in projected meters. Bounds are inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapWindow {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapWindow {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Wrapper for R-tree indexing of district centroids.
struct IndexedCentroid {
    district: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedCentroid {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Centroid index answering window-subset queries.
pub struct DistrictWindowIndex {
    tree: RTree<IndexedCentroid>,
}

impl DistrictWindowIndex {
    /// Build the index. Districts with no centroid (empty geometry) are
    /// skipped with a warning and never match a window.
    pub fn build(districts: &[EnrichedDistrict]) -> Self {
        let mut indexed = Vec::with_capacity(districts.len());
        for (i, district) in districts.iter().enumerate() {
            match district.geometry.centroid() {
                Some(point) => indexed.push(IndexedCentroid {
                    district: i,
                    envelope: AABB::from_point([point.x(), point.y()]),
                }),
                None => warn!(
                    "District {} has no centroid; excluded from window queries",
                    district.key
                ),
            }
        }
        let tree = RTree::bulk_load(indexed);
        info!("Centroid index built with {} entries", tree.size());
        Self { tree }
    }

    /// Indices of districts whose centroid lies inside the window, ascending.
    pub fn within(&self, window: &MapWindow) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [window.min_x, window.min_y],
            [window.max_x, window.max_y],
        );
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|ic| ic.district)
            .collect();
        hits.sort_unstable();
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
