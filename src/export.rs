//! Optional tabular and summary exports of the enriched districts.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::join::JoinReport;
use crate::models::EnrichedDistrict;

/// Write the enriched district table as CSV. Undefined densities are left
/// as an empty cell rather than a NaN marker.
pub fn write_district_table(path: &Path, districts: &[EnrichedDistrict]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(["county", "town", "count", "area_km2", "density_per_km2"])?;
    for district in districts {
        let count = district.count.to_string();
        let area = format!("{:.6}", district.area_km2);
        let density = district
            .density
            .map(|d| format!("{:.6}", d))
            .unwrap_or_default();
        writer.write_record([
            district.county.as_str(),
            district.town.as_str(),
            count.as_str(),
            area.as_str(),
            density.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Wrote district table to {}", path.display());
    Ok(())
}

/// Run summary with join diagnostics, for checking a render without
/// eyeballing the maps.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub county: String,
    pub districts: usize,
    pub matched: usize,
    pub match_rate: f64,
    pub unmatched_districts: Vec<String>,
    pub orphan_regions: Vec<String>,
    pub total_sites: u64,
}

impl RunSummary {
    pub fn new(county: &str, report: &JoinReport, total_sites: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            county: county.to_string(),
            districts: report.districts,
            matched: report.matched,
            match_rate: report.match_rate(),
            unmatched_districts: report
                .unmatched_districts
                .iter()
                .map(|key| key.as_str().to_string())
                .collect(),
            orphan_regions: report
                .orphan_keys
                .iter()
                .map(|key| key.as_str().to_string())
                .collect(),
            total_sites,
        }
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary).context("Failed to serialize run summary")?;

    info!("Wrote run summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DistrictKey;
    use geo::{Coord, LineString, MultiPolygon, Polygon};

    fn district(town: &str, count: u64, area_km2: f64) -> EnrichedDistrict {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        EnrichedDistrict {
            key: DistrictKey::from_parts("臺南市", town),
            county: "臺南市".to_string(),
            town: town.to_string(),
            geometry: MultiPolygon::new(vec![Polygon::new(LineString::new(ring), vec![])]),
            count,
            area_km2,
            density: if area_km2 > 0.0 {
                Some(count as f64 / area_km2)
            } else {
                None
            },
        }
    }

    #[test]
    fn test_district_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("districts.csv");

        let districts = vec![district("東區", 12, 13.5), district("南區", 0, 0.0)];
        write_district_table(&path, &districts).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "東區");
        assert_eq!(&rows[0][2], "12");
        // Undefined density stays blank.
        assert_eq!(&rows[1][4], "");
    }

    #[test]
    fn test_summary_serializes_diagnostics() {
        let report = JoinReport {
            districts: 37,
            matched: 36,
            unmatched_districts: vec![DistrictKey::from_parts("臺南市", "龍崎區")],
            orphan_keys: vec![DistrictKey::from_label("")],
        };
        let summary = RunSummary::new("臺南市", &report, 120);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary(&path, &summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["districts"], 37);
        assert_eq!(value["unmatched_districts"][0], "臺南市龍崎區");
        assert_eq!(value["orphan_regions"][0], "");
        assert!((value["match_rate"].as_f64().unwrap() - 36.0 / 37.0).abs() < 1.0e-12);
    }
}
