use chrono::Local;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::driver::ForecastDriver;
use crate::error::Result;
use crate::processors::{process_station, StationCatalogBuilder, StationOutcome};
use crate::utils::logging::init_logging;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            start_date,
            end_date,
            network,
            poll_interval,
            quiet,
        } => {
            let today = Local::now().date_naive();
            let start = start_date.unwrap_or(today);
            let end = end_date.unwrap_or(today);

            let mut driver = ForecastDriver::new(&config).with_silent(quiet);
            if let Some(secs) = poll_interval {
                driver = driver.with_poll_interval(Duration::from_secs(secs.max(1)));
            }
            if let Some(name) = network {
                driver = driver.only_network(&name)?;
            }

            println!("Processing forecasts from {} to {}", start, end);
            println!("Web directory: {}", config.web_dir.display());

            let report = driver.run(start, end).await?;
            println!("\n{}", report.generate_summary());
        }

        Commands::Process {
            forecast,
            observations,
            output,
        } => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            match process_station(&forecast, &observations, &output)? {
                StationOutcome::Written { path, features } => {
                    println!("Wrote {} features to {}", features, path.display());
                }
                StationOutcome::InsufficientData => {
                    warn!(path = %forecast.display(), "no output written");
                    println!("Not enough forecast data in {}, no output written", forecast.display());
                }
            }
        }

        Commands::Catalog {
            csv_output,
            geojson_output,
        } => {
            let csv_path = csv_output.unwrap_or_else(|| config.catalog.csv_output.clone());
            let geojson_path = geojson_output.unwrap_or_else(|| config.catalog.geojson_output.clone());

            info!(sources = config.catalog.sources.len(), "building station catalog");
            let builder = StationCatalogBuilder::new(config.catalog.sources.clone());
            let summary = builder.build_and_write(&csv_path, &geojson_path)?;

            println!("{}", summary.summary());
            println!("CSV catalog: {}", csv_path.display());
            println!("GeoJSON catalog: {}", geojson_path.display());
        }
    }

    Ok(())
}
