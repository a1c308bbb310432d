//! Pipeline configuration.
//!
//! Defaults carry the Tainan heritage report's literal inputs so a bare
//! `render` run reproduces it; a TOML file overrides any subset of fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::spatial::MapWindow;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// Heritage registry workbook.
    pub registry_file: PathBuf,
    /// Site-name column header.
    pub name_column: String,
    /// Region-list column header.
    pub region_column: String,

    /// Town boundary shapefile.
    pub boundary_file: PathBuf,
    /// County-name attribute field.
    pub county_field: String,
    /// Town-name attribute field.
    pub town_field: String,
    /// County kept by the boundary filter (exact match).
    pub county: String,

    /// Count-map class breaks, inclusive upper bounds.
    pub count_breaks: Vec<f64>,
    /// Density-map quantile class count.
    pub density_classes: usize,
    /// Projected-meter window for the outline map.
    pub window: MapWindow,

    /// Canvas size for the choropleth maps, pixels.
    pub map_size: (u32, u32),
    /// Canvas size for the outline map, pixels.
    pub outline_size: (u32, u32),

    pub count_title: String,
    pub density_title: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            registry_file: PathBuf::from("文化資產複合查詢.xlsx"),
            name_column: "個案名稱".to_string(),
            region_column: "所在地理區域".to_string(),
            boundary_file: PathBuf::from("鄉(鎮、市、區)界線1140318/TOWN_MOI_1140318.shp"),
            county_field: "COUNTYNAME".to_string(),
            town_field: "TOWNNAME".to_string(),
            county: "臺南市".to_string(),
            count_breaks: vec![1.0, 5.0, 10.0, 20.0, 40.0, 60.0],
            density_classes: 5,
            window: MapWindow {
                min_x: 160_000.0,
                min_y: 2_500_000.0,
                max_x: 180_000.0,
                max_y: 2_553_000.0,
            },
            map_size: (1000, 1000),
            outline_size: (800, 800),
            count_title: "臺南市各行政區古蹟數量著色圖".to_string(),
            density_title: "臺南市古蹟密度著色圖（每平方公里）".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: PipelineConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_report() {
        let config = PipelineConfig::default();
        assert_eq!(config.county, "臺南市");
        assert_eq!(config.count_breaks, vec![1.0, 5.0, 10.0, 20.0, 40.0, 60.0]);
        assert_eq!(config.density_classes, 5);
        assert_eq!(config.window.min_x, 160_000.0);
        assert_eq!(config.window.max_y, 2_553_000.0);
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let toml = r#"
            county = "高雄市"
            count_breaks = [1.0, 10.0, 50.0]

            [window]
            min_x = 150000.0
            min_y = 2400000.0
            max_x = 200000.0
            max_y = 2600000.0
        "#;
        let config: PipelineConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.county, "高雄市");
        assert_eq!(config.count_breaks, vec![1.0, 10.0, 50.0]);
        // Untouched fields keep their defaults.
        assert_eq!(config.region_column, "所在地理區域");
        assert_eq!(config.map_size, (1000, 1000));
        assert_eq!(config.window.max_x, 200_000.0);
    }
}
