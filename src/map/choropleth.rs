//! Classed choropleth rendering.

use anyhow::Result;
use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{PathElement, Polygon as FilledPolygon, Rectangle, Text};
use plotters::prelude::{DrawingBackend, IntoFont};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, RGBColor};

use super::classify::Classification;
use super::ramp::ColorRamp;
use super::scalebar::place_scale_bar;
use super::{data_bounds, equalized_ranges, to_anyhow};
use crate::models::EnrichedDistrict;

/// Style knobs shared by the classed maps.
#[derive(Debug, Clone)]
pub struct ChoroplethStyle {
    pub title: String,
    pub edge_color: RGBColor,
    pub edge_width: u32,
    pub ramp: ColorRamp,
}

/// Count choropleth: user-defined breaks over raw counts, OrRd fill.
pub fn render_count_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    districts: &[EnrichedDistrict],
    breaks: &[f64],
    title: &str,
) -> Result<()> {
    let values: Vec<f64> = districts.iter().map(|d| d.count as f64).collect();
    let classification = Classification::user_defined(breaks.to_vec());
    let style = ChoroplethStyle {
        title: title.to_string(),
        edge_color: BLACK,
        edge_width: 1,
        ramp: super::ramp::OR_RD,
    };
    render_choropleth(area, districts, &values, &classification, &style)
}

/// Density choropleth: quantile classes over log1p-compressed densities,
/// YlGnBu fill. Districts with undefined density render in the lowest
/// class.
pub fn render_density_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    districts: &[EnrichedDistrict],
    classes: usize,
    title: &str,
) -> Result<()> {
    let values: Vec<f64> = districts
        .iter()
        .map(|d| d.density.unwrap_or(0.0).ln_1p())
        .collect();
    let classification = Classification::quantiles(&values, classes);
    let style = ChoroplethStyle {
        title: title.to_string(),
        edge_color: BLACK,
        edge_width: 1,
        ramp: super::ramp::YL_GN_BU,
    };
    render_choropleth(area, districts, &values, &classification, &style)
}

/// Render one classed choropleth pass onto an explicit drawing area.
///
/// `values` must be parallel to `districts`. The pass is stateless:
/// surface in, pixels out, nothing retained. Presenting the surface is the
/// caller's job.
pub fn render_choropleth<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    districts: &[EnrichedDistrict],
    values: &[f64],
    classification: &Classification,
    style: &ChoroplethStyle,
) -> Result<()> {
    area.fill(&WHITE).map_err(to_anyhow)?;

    let Some(bounds) = data_bounds(districts) else {
        // Nothing to draw; leave the blank canvas.
        return Ok(());
    };
    let (x_range, y_range) = equalized_ranges(bounds, area.dim_in_pixel());

    let mut chart = ChartBuilder::on(area)
        .caption(&style.title, ("sans-serif", 28))
        .margin(16)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(to_anyhow)?;

    let classes = classification.class_count();
    for (district, value) in districts.iter().zip(values) {
        let class = classification.classify(*value);
        let fill = style.ramp.class_color(class, classes);
        draw_district(
            &mut chart,
            district,
            Some(fill),
            style.edge_color,
            style.edge_width,
        )?;
    }

    draw_legend(area, classification, &style.ramp)?;
    draw_scale_bar(&mut chart, x_range, y_range)?;

    Ok(())
}

/// Fill and stroke one district. With `fill` set, interior rings are
/// repainted white so holes stay holes.
pub(crate) fn draw_district<'a, DB: DrawingBackend>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    district: &EnrichedDistrict,
    fill: Option<RGBColor>,
    edge: RGBColor,
    edge_width: u32,
) -> Result<()> {
    for polygon in &district.geometry.0 {
        let exterior = ring_coords(polygon.exterior());

        if let Some(color) = fill {
            chart
                .draw_series(std::iter::once(FilledPolygon::new(
                    exterior.clone(),
                    color.filled(),
                )))
                .map_err(to_anyhow)?;
            for interior in polygon.interiors() {
                chart
                    .draw_series(std::iter::once(FilledPolygon::new(
                        ring_coords(interior),
                        WHITE.filled(),
                    )))
                    .map_err(to_anyhow)?;
            }
        }

        chart
            .draw_series(std::iter::once(PathElement::new(
                exterior,
                edge.stroke_width(edge_width),
            )))
            .map_err(to_anyhow)?;
        for interior in polygon.interiors() {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    ring_coords(interior),
                    edge.stroke_width(edge_width),
                )))
                .map_err(to_anyhow)?;
        }
    }
    Ok(())
}

fn ring_coords(ring: &geo::LineString<f64>) -> Vec<(f64, f64)> {
    ring.coords().map(|c| (c.x, c.y)).collect()
}

/// Class swatches with range labels in the upper-right corner.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    classification: &Classification,
    ramp: &ColorRamp,
) -> Result<()> {
    let labels = classification.labels();
    let classes = classification.class_count();
    let (width, _) = area.dim_in_pixel();

    let swatch = 14i32;
    let x = width as i32 - 140;
    let mut y = 56i32;

    for (class, label) in labels.iter().enumerate() {
        let color = ramp.class_color(class, classes);
        area.draw(&Rectangle::new(
            [(x, y), (x + swatch, y + swatch)],
            color.filled(),
        ))
        .map_err(to_anyhow)?;
        area.draw(&Rectangle::new(
            [(x, y), (x + swatch, y + swatch)],
            BLACK.stroke_width(1),
        ))
        .map_err(to_anyhow)?;
        area.draw(&Text::new(
            label.clone(),
            (x + swatch + 6, y + 2),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(to_anyhow)?;
        y += swatch + 6;
    }
    Ok(())
}

/// Lower-right distance bar with its length label.
pub(crate) fn draw_scale_bar<'a, DB: DrawingBackend>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<()> {
    let Some((bar_min, bar_max, label)) = place_scale_bar(x_range, y_range) else {
        return Ok(());
    };

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [bar_min, bar_max],
            BLACK.filled(),
        )))
        .map_err(to_anyhow)?;
    chart
        .draw_series(std::iter::once(Text::new(
            label,
            (bar_min.0, bar_max.1 + (y_range.1 - y_range.0) * 0.015),
            ("sans-serif", 14).into_font(),
        )))
        .map_err(to_anyhow)?;
    Ok(())
}
