use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::filename::{forecast_file_name, observation_file_name, output_file_name};
use crate::utils::constants::OBSERVATION_SUBDIR;

/// A monitoring network whose forecasts are published as one GeoJSON per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,

    /// Directory under the web root holding the prediction exports
    pub input_dir: PathBuf,

    /// Directory under the web root receiving the GeoJSON files
    pub output_dir: PathBuf,

    /// Whether file names carry the `_TCNN` model tag
    #[serde(default)]
    pub model_tagged_files: bool,
}

impl Network {
    pub fn new(name: &str, input_dir: &str, output_dir: &str, model_tagged_files: bool) -> Self {
        Self {
            name: name.to_string(),
            input_dir: PathBuf::from(input_dir),
            output_dir: PathBuf::from(output_dir),
            model_tagged_files,
        }
    }

    pub fn forecast_path(&self, web_dir: &Path, date: NaiveDate) -> PathBuf {
        web_dir
            .join(&self.input_dir)
            .join(forecast_file_name(date, self.model_tagged_files))
    }

    pub fn observation_path(&self, web_dir: &Path, date: NaiveDate) -> PathBuf {
        web_dir
            .join(&self.input_dir)
            .join(OBSERVATION_SUBDIR)
            .join(observation_file_name(date, self.model_tagged_files))
    }

    pub fn output_dir(&self, web_dir: &Path) -> PathBuf {
        web_dir.join(&self.output_dir)
    }

    pub fn output_path(&self, web_dir: &Path, date: NaiveDate) -> PathBuf {
        self.output_dir(web_dir).join(output_file_name(date))
    }

    /// The four networks of the production deployment
    pub fn defaults() -> Vec<Network> {
        vec![
            Network::new("DoS", "output", "output_DoS_geoJSON", false),
            Network::new("AERONET", "output_AERONET_site", "output_AERONET_geoJSON", false),
            Network::new("OpenAQ", "output_OpenAQ_site", "output_OpenAQ_geoJSON", false),
            Network::new("AAQE", "output_TCNN_AAQE", "output_AAQE_geoJSON", true),
        ]
    }
}
