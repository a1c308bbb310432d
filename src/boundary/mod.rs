//! Administrative boundary ingestion.
//!
//! Reads town polygons from a shapefile, keeps the rows of one county, and
//! synthesizes each row's composite join key.

mod loader;

pub use loader::{load_districts, BoundarySchemaError};
