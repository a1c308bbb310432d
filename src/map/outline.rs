//! Boundary-only outline rendering.

use anyhow::Result;
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::prelude::DrawingBackend;
use plotters::style::colors::WHITE;
use plotters::style::RGBColor;

use super::choropleth::draw_district;
use super::{data_bounds, equalized_ranges, to_anyhow};
use crate::models::EnrichedDistrict;

/// Render district outlines only: single stroke color, no fill, no
/// classification chrome. An empty subset leaves a blank canvas.
pub fn render_outline_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    districts: &[EnrichedDistrict],
    edge: RGBColor,
    edge_width: u32,
) -> Result<()> {
    area.fill(&WHITE).map_err(to_anyhow)?;

    let Some(bounds) = data_bounds(districts) else {
        return Ok(());
    };
    let (x_range, y_range) = equalized_ranges(bounds, area.dim_in_pixel());

    let mut chart = ChartBuilder::on(area)
        .margin(16)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(to_anyhow)?;

    for district in districts {
        draw_district(&mut chart, district, None, edge, edge_width)?;
    }

    Ok(())
}
