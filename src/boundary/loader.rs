use std::path::Path;

use anyhow::{Context, Result};
use geo::MultiPolygon;
use shapefile::dbase::{FieldValue, Record};
use shapefile::Shape;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{District, DistrictKey};

/// Schema violations in the boundary dataset.
#[derive(Debug, Error)]
pub enum BoundarySchemaError {
    #[error("attribute table has no '{0}' character field")]
    MissingField(String),

    #[error("feature {index} has shape type {shape}, expected polygon")]
    NotAPolygon { index: usize, shape: String },
}

/// Read town polygons and keep the rows of one county.
///
/// The county filter is an exact, case-sensitive match on `county_field`.
/// An empty result is legal (the caller decides whether a blank map is
/// acceptable) but is logged loudly.
pub fn load_districts(
    path: &Path,
    county_field: &str,
    town_field: &str,
    target_county: &str,
) -> Result<Vec<District>> {
    info!("Loading boundary polygons from {}", path.display());

    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile {}", path.display()))?;

    let mut districts = Vec::new();
    let mut scanned = 0usize;

    for (index, feature) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) =
            feature.with_context(|| format!("Failed to read boundary feature {}", index))?;
        scanned += 1;

        let county = character_field(&record, county_field)
            .ok_or_else(|| BoundarySchemaError::MissingField(county_field.to_string()))?;
        if county != target_county {
            continue;
        }
        let town = character_field(&record, town_field)
            .ok_or_else(|| BoundarySchemaError::MissingField(town_field.to_string()))?;

        let geometry: MultiPolygon<f64> = match shape {
            Shape::Polygon(polygon) => polygon.into(),
            other => {
                return Err(BoundarySchemaError::NotAPolygon {
                    index,
                    shape: format!("{:?}", other.shapetype()),
                }
                .into())
            }
        };

        let key = DistrictKey::from_parts(&county, &town);
        debug!("District {} ({} polygons)", key, geometry.0.len());
        districts.push(District {
            key,
            county,
            town,
            geometry,
        });
    }

    if districts.is_empty() {
        warn!(
            "No boundary rows matched county '{}' ({} features scanned); downstream maps will be blank",
            target_county, scanned
        );
    } else {
        info!(
            "Kept {} of {} boundary rows for {}",
            districts.len(),
            scanned,
            target_county
        );
    }

    Ok(districts)
}

fn character_field(record: &Record, name: &str) -> Option<String> {
    match record.get(name) {
        Some(FieldValue::Character(Some(value))) => Some(value.clone()),
        Some(FieldValue::Character(None)) => Some(String::new()),
        _ => None,
    }
}
