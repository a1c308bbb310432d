use anyhow::{Context, Result};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use std::path::Path;
use tracing::info;

use crate::models::HeritageSite;

/// Read the heritage registry workbook.
///
/// The first worksheet is used. Columns are located by header text on the
/// first row; `region_column` must exist, `name_column` is optional (rows
/// keep an empty name when it is absent).
pub fn load_sites(
    path: &Path,
    name_column: &str,
    region_column: &str,
) -> Result<Vec<HeritageSite>> {
    info!("Loading heritage registry from {}", path.display());

    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open registry workbook {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .context("Registry workbook has no worksheets")?
        .context("Failed to read first worksheet")?;

    let mut rows = range.rows();
    let header = rows.next().context("Registry worksheet is empty")?;

    let region_idx = header
        .iter()
        .position(|cell| cell.get_string() == Some(region_column))
        .with_context(|| format!("Column '{}' not found in registry header", region_column))?;
    let name_idx = header
        .iter()
        .position(|cell| cell.get_string() == Some(name_column));

    let mut sites = Vec::new();
    for row in rows {
        let regions = cell_text(row.get(region_idx));
        let name = name_idx.map(|i| cell_text(row.get(i))).unwrap_or_default();
        sites.push(HeritageSite { name, regions });
    }

    info!("Loaded {} registry rows", sites.len());
    Ok(sites)
}

/// Cell content as text; blank cells become the empty string so a missing
/// region field still yields its single empty token downstream.
fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(c) if c.is_empty() => String::new(),
        Some(c) => c
            .get_string()
            .map(str::to_owned)
            .unwrap_or_else(|| c.to_string()),
    }
}
