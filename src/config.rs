//! Layered runtime configuration.
//!
//! Values come from built-in defaults, then an optional config file, then
//! `AQI_FORECAST__*` environment variables (e.g. `AQI_FORECAST__WEB_DIR`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ProcessingError, Result};
use crate::models::Network;
use crate::utils::constants::{CONFIG_ENV_PREFIX, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_WEB_DIR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Web root holding every network's input and output directories
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,

    /// Seconds between checks for a forecast export that has not appeared yet
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "Network::defaults")]
    pub networks: Vec<Network>,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_sources")]
    pub sources: Vec<CatalogSource>,

    #[serde(default = "default_catalog_csv")]
    pub csv_output: PathBuf,

    #[serde(default = "default_catalog_geojson")]
    pub geojson_output: PathBuf,
}

/// A station metadata table belonging to one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    pub path: PathBuf,

    /// Network label written to the `Forecast` column
    pub label: String,

    /// Replace hyphens with underscores and trim site names
    #[serde(default)]
    pub normalize_site_names: bool,
}

fn default_web_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WEB_DIR)
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_catalog_csv() -> PathBuf {
    PathBuf::from("out.csv")
}

fn default_catalog_geojson() -> PathBuf {
    PathBuf::from("out.geojson")
}

fn default_catalog_sources() -> Vec<CatalogSource> {
    let source = |path: &str, label: &str, normalize_site_names: bool| CatalogSource {
        path: PathBuf::from(path),
        label: label.to_string(),
        normalize_site_names,
    };

    vec![
        source("station_270_updates_Feb_11_2025_updated.csv", "DoS Missions", false),
        source("stations_AERONET_07262024.csv", "AERONET", true),
        source("stations_OpenAQ_05082025.csv", "Open AQ", false),
        source("AAQE_station_07302025.csv", "African AQE", false),
    ]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources: default_catalog_sources(),
            csv_output: default_catalog_csv(),
            geojson_output: default_catalog_geojson(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web_dir: default_web_dir(),
            poll_interval_secs: default_poll_interval_secs(),
            networks: Network::defaults(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            return Err(ProcessingError::Config(
                "at least one network must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for network in &self.networks {
            if !seen.insert(network.name.as_str()) {
                return Err(ProcessingError::Config(format!(
                    "network '{}' is configured more than once",
                    network.name
                )));
            }
        }

        if self.poll_interval_secs == 0 {
            return Err(ProcessingError::Config(
                "poll_interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }
}
