//! Static map rendering: classification, color ramps, and the choropleth
//! and outline passes.
//!
//! Every pass draws onto an explicit `DrawingArea` handle and keeps no
//! state between calls; the caller owns the surface and decides when to
//! present it.

mod choropleth;
mod classify;
mod outline;
mod ramp;
mod scalebar;

pub use choropleth::{render_choropleth, render_count_map, render_density_map, ChoroplethStyle};
pub use classify::Classification;
pub use outline::render_outline_map;
pub use ramp::{ColorRamp, OR_RD, YL_GN_BU};
pub use scalebar::{nice_scale_length, place_scale_bar, scale_label};

use geo::BoundingRect;

use crate::models::EnrichedDistrict;

/// Combined bounding box of all district geometries, as
/// (min_x, min_y, max_x, max_y).
pub(crate) fn data_bounds(districts: &[EnrichedDistrict]) -> Option<(f64, f64, f64, f64)> {
    let mut acc: Option<(f64, f64, f64, f64)> = None;
    for district in districts {
        if let Some(rect) = district.geometry.bounding_rect() {
            let entry = (rect.min().x, rect.min().y, rect.max().x, rect.max().y);
            acc = Some(match acc {
                None => entry,
                Some((x0, y0, x1, y1)) => (
                    x0.min(entry.0),
                    y0.min(entry.1),
                    x1.max(entry.2),
                    y1.max(entry.3),
                ),
            });
        }
    }
    acc
}

/// Pad the data bounds so both axes share one meters-per-pixel scale on the
/// given canvas, keeping the map's aspect ratio honest.
pub(crate) fn equalized_ranges(
    bounds: (f64, f64, f64, f64),
    pixels: (u32, u32),
) -> ((f64, f64), (f64, f64)) {
    let (min_x, min_y, max_x, max_y) = bounds;
    let pad_x = (max_x - min_x).max(1.0) * 0.03;
    let pad_y = (max_y - min_y).max(1.0) * 0.03;
    let (mut min_x, mut max_x) = (min_x - pad_x, max_x + pad_x);
    let (mut min_y, mut max_y) = (min_y - pad_y, max_y + pad_y);

    let width = pixels.0.max(1) as f64;
    let height = pixels.1.max(1) as f64;
    let per_px = ((max_x - min_x) / width).max((max_y - min_y) / height);

    let grow_x = per_px * width - (max_x - min_x);
    let grow_y = per_px * height - (max_y - min_y);
    min_x -= grow_x / 2.0;
    max_x += grow_x / 2.0;
    min_y -= grow_y / 2.0;
    max_y += grow_y / 2.0;

    ((min_x, max_x), (min_y, max_y))
}

pub(crate) fn to_anyhow<E: std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow::anyhow!("drawing failed: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DistrictKey;
    use geo::{Coord, LineString, MultiPolygon, Polygon};

    #[test]
    fn test_equalized_ranges_share_one_scale() {
        let ((min_x, max_x), (min_y, max_y)) =
            equalized_ranges((0.0, 0.0, 100.0, 50.0), (100, 100));

        let per_px_x = (max_x - min_x) / 100.0;
        let per_px_y = (max_y - min_y) / 100.0;
        assert!((per_px_x - per_px_y).abs() < 1.0e-9);

        // The original bounds stay inside the padded ranges.
        assert!(min_x < 0.0 && max_x > 100.0);
        assert!(min_y < 0.0 && max_y > 50.0);
    }

    #[test]
    fn test_data_bounds_covers_all_districts() {
        let square = |cx: f64, cy: f64| {
            let ring = vec![
                Coord { x: cx - 1.0, y: cy - 1.0 },
                Coord { x: cx + 1.0, y: cy - 1.0 },
                Coord { x: cx + 1.0, y: cy + 1.0 },
                Coord { x: cx - 1.0, y: cy + 1.0 },
                Coord { x: cx - 1.0, y: cy - 1.0 },
            ];
            MultiPolygon::new(vec![Polygon::new(LineString::new(ring), vec![])])
        };
        let district = |town: &str, cx: f64, cy: f64| EnrichedDistrict {
            key: DistrictKey::from_parts("臺南市", town),
            county: "臺南市".to_string(),
            town: town.to_string(),
            geometry: square(cx, cy),
            count: 0,
            area_km2: 4.0,
            density: Some(0.0),
        };

        let bounds = data_bounds(&[district("a", 0.0, 0.0), district("b", 10.0, 5.0)]).unwrap();
        assert_eq!(bounds, (-1.0, -1.0, 11.0, 6.0));

        assert!(data_bounds(&[]).is_none());
    }
}
