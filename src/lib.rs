//! Banyan - choropleth mapping of heritage sites across administrative
//! districts.
//!
//! This library provides the pipeline stages shared by the render binary:
//! registry ingestion, boundary loading, count joining, planar metrics, and
//! static map rendering.

pub mod boundary;
pub mod config;
pub mod export;
pub mod join;
pub mod map;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod spatial;

pub use models::{District, DistrictKey, EnrichedDistrict, HeritageSite, SiteRegion};
