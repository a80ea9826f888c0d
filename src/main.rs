// src/main.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use land_health::analysis::{SinglePeriodAnalyzer, TimeSeriesAnalyzer};
use land_health::catalog::GriddedCatalog;
use land_health::cli::{Cli, Commands};
use land_health::geometry::AreaOfInterest;
use land_health::period::{Cadence, DateRange};

/// GeoJSON-style polygon geometry, the shape the analysis endpoint accepted.
#[derive(Deserialize)]
struct PolygonGeometry {
    coordinates: Vec<Vec<[f64; 2]>>,
}

fn load_aoi(path: &Path) -> Result<AreaOfInterest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading AOI file {}", path.display()))?;
    let geometry: PolygonGeometry =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(AreaOfInterest::from_rings(&geometry.coordinates)?)
}

fn emit(report: &impl serde::Serialize, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Analyze { aoi, start, end } => {
            let aoi = load_aoi(aoi)?;
            let range = DateRange::new(*start, *end)?;
            let catalog = GriddedCatalog::from_path(&cli.catalog)
                .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
            let report = SinglePeriodAnalyzer::new(&catalog).run(&aoi, &range)?;
            emit(&report, cli.output.as_deref())?;
        }
        Commands::Timeseries {
            aoi,
            start,
            end,
            cadence,
        } => {
            // Reject a bad cadence token before touching the catalog.
            let cadence: Cadence = cadence.parse()?;
            let aoi = load_aoi(aoi)?;
            let range = DateRange::new(*start, *end)?;
            let catalog = GriddedCatalog::from_path(&cli.catalog)
                .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
            let report = TimeSeriesAnalyzer::new(&catalog).run(&aoi, &range, cadence)?;
            emit(&report, cli.output.as_deref())?;
        }
    }

    Ok(())
}
