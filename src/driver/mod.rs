//! Per-network, per-date orchestration of the forecast pipeline.

pub mod poller;
pub mod report;

pub use poller::FilePoller;
pub use report::{RunOutcome, RunRecord, RunReport};

use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::error::{ProcessingError, Result};
use crate::models::Network;
use crate::processors::{process_station, StationOutcome};
use crate::utils::filename::date_stamp;
use crate::utils::progress::ProgressReporter;

/// Runs the pipeline for every configured network on every date of a range.
///
/// Runs are sequential. A failing or skipped run never stops the ones after it.
pub struct ForecastDriver {
    web_dir: PathBuf,
    networks: Vec<Network>,
    poller: FilePoller,
    silent: bool,
}

impl ForecastDriver {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            web_dir: config.web_dir.clone(),
            networks: config.networks.clone(),
            poller: FilePoller::new(config.poll_interval()),
            silent: false,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poller = FilePoller::new(interval);
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Restrict the run to a single configured network
    pub fn only_network(mut self, name: &str) -> Result<Self> {
        self.networks.retain(|n| n.name == name);
        if self.networks.is_empty() {
            return Err(ProcessingError::Config(format!("unknown network '{}'", name)));
        }
        Ok(self)
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub async fn run(&self, start: NaiveDate, end: NaiveDate) -> Result<RunReport> {
        if start > end {
            return Err(ProcessingError::Config(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        let days = (end - start).num_days() as u64 + 1;
        let total_runs = days * self.networks.len() as u64;
        let progress = ProgressReporter::new(total_runs, "Processing forecasts...", self.silent);

        info!(
            start = %start,
            end = %end,
            networks = self.networks.len(),
            "starting forecast run"
        );

        let mut report = RunReport::default();
        for date in start.iter_days().take_while(|d| *d <= end) {
            for network in &self.networks {
                let outcome = match self.run_once(network, date, &progress).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(network = %network.name, date = %date, error = %e, "forecast run failed");
                        RunOutcome::Failed(e.to_string())
                    }
                };
                report.record(&network.name, date, outcome);
                progress.increment(1);
            }
        }

        progress.finish_with_message(&format!(
            "Produced {} of {} forecasts",
            report.produced_count(),
            report.runs.len()
        ));
        Ok(report)
    }

    #[instrument(skip_all, fields(network = %network.name, date = %date))]
    async fn run_once(
        &self,
        network: &Network,
        date: NaiveDate,
        progress: &ProgressReporter,
    ) -> Result<RunOutcome> {
        tokio::fs::create_dir_all(network.output_dir(&self.web_dir)).await?;

        let forecast = network.forecast_path(&self.web_dir, date);
        let observation = network.observation_path(&self.web_dir, date);
        let output = network.output_path(&self.web_dir, date);

        self.poller.wait_for(&forecast, Some(progress)).await;
        progress.set_message(&format!("Processing {} {}", network.name, date_stamp(date)));

        let outcome =
            tokio::task::spawn_blocking(move || process_station(&forecast, &observation, &output))
                .await??;

        Ok(match outcome {
            StationOutcome::Written { path, features } => RunOutcome::Produced { path, features },
            StationOutcome::InsufficientData => RunOutcome::Skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(web_dir: &std::path::Path) -> AppConfig {
        AppConfig {
            web_dir: web_dir.to_path_buf(),
            poll_interval_secs: 1,
            networks: vec![
                Network::new("DoS", "output", "output_DoS_geoJSON", false),
                Network::new("AAQE", "output_TCNN_AAQE", "output_AAQE_geoJSON", true),
            ],
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_only_network() {
        let dir = TempDir::new().unwrap();
        let driver = ForecastDriver::new(&config(dir.path())).only_network("AAQE").unwrap();
        assert_eq!(driver.networks().len(), 1);

        assert!(ForecastDriver::new(&config(dir.path())).only_network("Nope").is_err());
    }

    #[test]
    fn test_poll_interval_override() {
        let dir = TempDir::new().unwrap();
        let driver = ForecastDriver::new(&config(dir.path()));
        assert_eq!(driver.poller.interval(), Duration::from_secs(1));

        let driver = driver.with_poll_interval(Duration::from_millis(250));
        assert_eq!(driver.poller.interval(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_reversed_range_is_rejected() {
        let dir = TempDir::new().unwrap();
        let driver = ForecastDriver::new(&config(dir.path())).with_silent(true);
        let start = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();

        assert!(matches!(driver.run(start, end).await, Err(ProcessingError::Config(_))));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_runs() -> Result<()> {
        let dir = TempDir::new()?;
        let date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();

        // DoS has a forecast but no observations; AAQE has too little data
        fs::create_dir_all(dir.path().join("output"))?;
        fs::write(
            dir.path().join("output/20251124_pred.csv"),
            "Site_Name,Lat,Lon,UTC_DATE,UTC_TIME,AQI_3HR_TCNN,PM25_3HR_TCNN\nGSFC,38.99,-76.84,2025-11-24,00:00,48,11.2\n",
        )?;
        fs::create_dir_all(dir.path().join("output_TCNN_AAQE"))?;
        fs::write(
            dir.path().join("output_TCNN_AAQE/20251124_pred_TCNN.csv"),
            "Site_Name,Lat,Lon,UTC_DATE,UTC_TIME,AQI_3HR_TCNN\n",
        )?;

        let driver = ForecastDriver::new(&config(dir.path())).with_silent(true);
        let report = driver.run(date, date).await?;

        assert_eq!(report.runs.len(), 2);
        assert!(matches!(report.runs[0].outcome, RunOutcome::Failed(_)));
        assert_eq!(report.runs[1].outcome, RunOutcome::Skipped);
        assert!(dir.path().join("output_DoS_geoJSON").is_dir());
        assert!(!dir.path().join("output_AAQE_geoJSON/20251124_forecast.geojson").exists());

        Ok(())
    }
}
