//! Heritage choropleth rendering pipeline.
//!
//! Loads the registry and boundary inputs, joins counts onto districts,
//! computes planar metrics, and writes the map set as PNGs.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plotters::prelude::{BitMapBackend, IntoDrawingArea};
use plotters::style::colors::RED;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use banyan::boundary::load_districts;
use banyan::config::PipelineConfig;
use banyan::export::{write_district_table, write_summary, RunSummary};
use banyan::join::join_counts;
use banyan::map::{render_count_map, render_density_map, render_outline_map};
use banyan::metrics::{enrich, TWD97_TM2};
use banyan::registry::{expand_regions, load_sites, RegionTally};
use banyan::spatial::DistrictWindowIndex;

#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(about = "Render heritage-site choropleth maps")]
struct Args {
    /// Optional TOML config; defaults cover the Tainan report inputs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Heritage registry workbook (overrides config)
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Town boundary shapefile (overrides config)
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// County to map (overrides config)
    #[arg(long)]
    county: Option<String>,

    /// Output directory for rendered maps
    #[arg(long, default_value = "maps")]
    out_dir: PathBuf,

    /// Also render the density map (dropped from the report, off by default)
    #[arg(long)]
    with_density_map: bool,

    /// Write the enriched district table as CSV
    #[arg(long)]
    export_table: Option<PathBuf>,

    /// Write a JSON run summary with join diagnostics
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(path) = args.registry {
        cfg.registry_file = path;
    }
    if let Some(path) = args.boundary {
        cfg.boundary_file = path;
    }
    if let Some(county) = args.county {
        cfg.county = county;
    }

    info!("Banyan map pipeline");
    info!("Registry: {}", cfg.registry_file.display());
    info!("Boundary: {}", cfg.boundary_file.display());

    let sites = load_sites(&cfg.registry_file, &cfg.name_column, &cfg.region_column)
        .context("Failed to load heritage registry")?;
    let records = expand_regions(&sites);
    let tally = RegionTally::from_records(&records);

    let districts = load_districts(
        &cfg.boundary_file,
        &cfg.county_field,
        &cfg.town_field,
        &cfg.county,
    )
    .context("Failed to load boundary polygons")?;

    let (joined, report) = join_counts(districts, &tally);
    info!(
        "Join matched {}/{} districts ({:.0}% match rate)",
        report.matched,
        report.districts,
        report.match_rate() * 100.0
    );
    if report.match_rate() < 0.5 {
        warn!("Low join-match rate; check the county filter and region labels");
    }

    let enriched = enrich(joined, &TWD97_TM2);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let count_path = args.out_dir.join("heritage_counts.png");
    {
        let root = BitMapBackend::new(&count_path, cfg.map_size).into_drawing_area();
        render_count_map(&root, &enriched, &cfg.count_breaks, &cfg.count_title)?;
        root.present()
            .map_err(|e| anyhow::anyhow!("Failed to write count map: {}", e))?;
    }
    info!("Wrote {}", count_path.display());

    if args.with_density_map {
        let density_path = args.out_dir.join("heritage_density.png");
        let root = BitMapBackend::new(&density_path, cfg.map_size).into_drawing_area();
        render_density_map(&root, &enriched, cfg.density_classes, &cfg.density_title)?;
        root.present()
            .map_err(|e| anyhow::anyhow!("Failed to write density map: {}", e))?;
        info!("Wrote {}", density_path.display());
    }

    let index = DistrictWindowIndex::build(&enriched);
    let subset_indices = index.within(&cfg.window);
    if subset_indices.is_empty() {
        warn!("No district centroid falls inside the outline window; the outline map will be blank");
    }
    let subset: Vec<_> = subset_indices
        .iter()
        .map(|&i| enriched[i].clone())
        .collect();

    let outline_path = args.out_dir.join("district_outlines.png");
    {
        let root = BitMapBackend::new(&outline_path, cfg.outline_size).into_drawing_area();
        render_outline_map(&root, &subset, RED, 2)?;
        root.present()
            .map_err(|e| anyhow::anyhow!("Failed to write outline map: {}", e))?;
    }
    info!("Wrote {}", outline_path.display());

    if let Some(path) = &args.export_table {
        write_district_table(path, &enriched)?;
    }
    if let Some(path) = &args.summary {
        let summary = RunSummary::new(&cfg.county, &report, tally.total());
        write_summary(path, &summary)?;
    }

    info!(
        "Done: {} districts, {} heritage records",
        enriched.len(),
        records.len()
    );

    Ok(())
}
