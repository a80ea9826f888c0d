use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "land-health")]
#[command(about = "Vegetation and soil condition analysis over an imagery catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog file (gridded scene archive, JSON)
    #[arg(short, long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Single-period analysis: NDVI/BSI area breakdowns for one date window
    Analyze {
        /// AOI polygon file (GeoJSON-style geometry with "coordinates")
        #[arg(short, long)]
        aoi: PathBuf,

        /// Window start date (inclusive), YYYY-MM-DD
        #[arg(short, long)]
        start: NaiveDate,

        /// Window end date (exclusive), YYYY-MM-DD
        #[arg(short, long)]
        end: NaiveDate,
    },

    /// Vegetation trend sampled at a fixed cadence over the date window
    Timeseries {
        /// AOI polygon file (GeoJSON-style geometry with "coordinates")
        #[arg(short, long)]
        aoi: PathBuf,

        /// Window start date (inclusive), YYYY-MM-DD
        #[arg(short, long)]
        start: NaiveDate,

        /// Window end date (exclusive), YYYY-MM-DD
        #[arg(short, long)]
        end: NaiveDate,

        /// Sampling step: biweekly, monthly or quarterly
        #[arg(long, default_value = "monthly")]
        cadence: String,
    },
}
