//! Heritage registry ingestion.
//!
//! Loads the registry spreadsheet and tallies per-district site counts
//! from the comma-delimited region column.

mod loader;
mod tally;

pub use loader::load_sites;
pub use tally::{expand_regions, RegionTally};
