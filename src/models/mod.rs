//! Core data models for the choropleth pipeline.

pub mod district;
pub mod site;

pub use district::{District, DistrictKey, EnrichedDistrict};
pub use site::{HeritageSite, SiteRegion};
