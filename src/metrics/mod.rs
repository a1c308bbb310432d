//! Planar metrics: reprojection, polygon area, site density.

pub mod projection;

pub use projection::{TransverseMercator, TWD97_TM2};

use geo::{Area, MultiPolygon};
use tracing::warn;

use crate::join::CountedDistrict;
use crate::models::EnrichedDistrict;

/// Planar polygon area in square kilometers. The geometry must already be
/// in projected meters.
pub fn area_km2(geometry: &MultiPolygon<f64>) -> f64 {
    geometry.unsigned_area() / 1.0e6
}

/// Sites per square kilometer; `None` for degenerate areas.
pub fn density_per_km2(count: u64, area_km2: f64) -> Option<f64> {
    if area_km2 > 0.0 {
        Some(count as f64 / area_km2)
    } else {
        None
    }
}

/// Reproject joined districts and derive area and density.
pub fn enrich(
    joined: Vec<CountedDistrict>,
    projection: &TransverseMercator,
) -> Vec<EnrichedDistrict> {
    let mut enriched = Vec::with_capacity(joined.len());
    for CountedDistrict { district, count } in joined {
        let geometry = projection.project_geometry(&district.geometry);
        let area = area_km2(&geometry);
        let density = density_per_km2(count, area);
        if density.is_none() {
            warn!(
                "District {} has degenerate area; density undefined",
                district.key
            );
        }
        enriched.push(EnrichedDistrict {
            key: district.key,
            county: district.county,
            town: district.town,
            geometry,
            count,
            area_km2: area,
            density,
        });
    }
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{District, DistrictKey};
    use geo::{Coord, LineString, Polygon};

    fn square(cx: f64, cy: f64, half: f64) -> MultiPolygon<f64> {
        let ring = vec![
            Coord { x: cx - half, y: cy - half },
            Coord { x: cx + half, y: cy - half },
            Coord { x: cx + half, y: cy + half },
            Coord { x: cx - half, y: cy + half },
            Coord { x: cx - half, y: cy - half },
        ];
        MultiPolygon::new(vec![Polygon::new(LineString::new(ring), vec![])])
    }

    #[test]
    fn test_area_of_planar_square() {
        // 10 km × 10 km in projected meters.
        let geometry = square(170_000.0, 2_520_000.0, 5_000.0);
        assert!((area_km2(&geometry) - 100.0).abs() < 1.0e-9);
    }

    #[test]
    fn test_density_is_exact_ratio() {
        assert_eq!(density_per_km2(25, 100.0), Some(0.25));
        assert_eq!(density_per_km2(0, 100.0), Some(0.0));
    }

    #[test]
    fn test_degenerate_area_has_no_density() {
        assert_eq!(density_per_km2(3, 0.0), None);

        let empty = MultiPolygon::<f64>::new(vec![]);
        assert_eq!(area_km2(&empty), 0.0);
    }

    #[test]
    fn test_enrich_projects_and_derives_metrics() {
        let joined = vec![CountedDistrict {
            district: District {
                key: DistrictKey::from_parts("臺南市", "中西區"),
                county: "臺南市".to_string(),
                town: "中西區".to_string(),
                // Roughly 0.1° × 0.1° around Tainan.
                geometry: square(120.2, 23.0, 0.05),
            },
            count: 10,
        }];

        let enriched = enrich(joined, &TWD97_TM2);
        assert_eq!(enriched.len(), 1);

        let district = &enriched[0];
        // ~10.2 km wide, ~11.1 km tall at this latitude.
        assert!(
            district.area_km2 > 100.0 && district.area_km2 < 130.0,
            "area was {}",
            district.area_km2
        );
        let density = district.density.expect("area is non-degenerate");
        assert!((density - district.count as f64 / district.area_km2).abs() < 1.0e-12);
    }

    #[test]
    fn test_enrich_is_deterministic() {
        let make = || {
            vec![CountedDistrict {
                district: District {
                    key: DistrictKey::from_parts("臺南市", "東區"),
                    county: "臺南市".to_string(),
                    town: "東區".to_string(),
                    geometry: square(120.25, 23.0, 0.02),
                },
                count: 7,
            }]
        };

        let first = enrich(make(), &TWD97_TM2);
        let second = enrich(make(), &TWD97_TM2);
        assert_eq!(first[0].count, second[0].count);
        assert_eq!(first[0].area_km2, second[0].area_km2);
        assert_eq!(first[0].density, second[0].density);
    }
}
