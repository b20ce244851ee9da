use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aqi-forecast")]
#[command(about = "Publishes 3-hour AQI forecasts joined with daily observations as GeoJSON")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for each network's exports and publish one GeoJSON per day
    Run {
        #[arg(long, help = "First processing date (YYYY-MM-DD) [default: today]")]
        start_date: Option<NaiveDate>,

        #[arg(long, help = "Last processing date (YYYY-MM-DD) [default: today]")]
        end_date: Option<NaiveDate>,

        #[arg(short, long, help = "Only process this configured network")]
        network: Option<String>,

        #[arg(long, help = "Seconds between checks for a missing export")]
        poll_interval: Option<u64>,

        #[arg(short, long, default_value = "false", help = "Hide progress output")]
        quiet: bool,
    },

    /// Process a single forecast/observation export pair
    Process {
        #[arg(short, long, help = "Forecast predictions CSV")]
        forecast: PathBuf,

        #[arg(short = 'a', long, help = "Daily AQI observations CSV")]
        observations: PathBuf,

        #[arg(short, long, help = "Output GeoJSON file")]
        output: PathBuf,
    },

    /// Build the unified station catalog from the configured station tables
    Catalog {
        #[arg(long, help = "Catalog CSV output [default: from configuration]")]
        csv_output: Option<PathBuf>,

        #[arg(long, help = "Catalog GeoJSON output [default: from configuration]")]
        geojson_output: Option<PathBuf>,
    },
}
