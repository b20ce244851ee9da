use crate::error::Result;
use crate::models::ReshapeOutcome;
use crate::processors::{ForecastReshaper, ObservationJoiner};
use crate::readers::TableReader;
use crate::utils::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::writers::{to_geojson, GeoJsonWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What one station-network run produced
#[derive(Debug, Clone, PartialEq)]
pub enum StationOutcome {
    Written { path: PathBuf, features: usize },
    /// The forecast export could not be reshaped; nothing was written
    InsufficientData,
}

/// Runs reshape, join and GeoJSON packaging for one pair of exports.
pub struct StationProcessor {
    reader: TableReader,
    reshaper: ForecastReshaper,
    joiner: ObservationJoiner,
    writer: GeoJsonWriter,
}

impl StationProcessor {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
            reshaper: ForecastReshaper::new(),
            joiner: ObservationJoiner::new(),
            writer: GeoJsonWriter::new(),
        }
    }

    pub fn with_reshaper(mut self, reshaper: ForecastReshaper) -> Self {
        self.reshaper = reshaper;
        self
    }

    /// The observation export is only read once the forecast reshaped.
    pub fn process(
        &self,
        forecast_path: &Path,
        observation_path: &Path,
        output_path: &Path,
    ) -> Result<StationOutcome> {
        let forecast = self.reader.read_table(forecast_path)?;

        let wide = match self.reshaper.reshape(&forecast)? {
            ReshapeOutcome::Produced(wide) => wide,
            ReshapeOutcome::InsufficientData => {
                warn!(path = %forecast_path.display(), "forecast export has too little data, skipping");
                return Ok(StationOutcome::InsufficientData);
            }
        };

        let observations = self.reader.read_table(observation_path)?;
        let joined = self.joiner.join(&wide, &observations)?;

        let collection = to_geojson(&joined, LATITUDE_COLUMN, LONGITUDE_COLUMN)?;
        self.writer.write(&collection, output_path)?;

        info!(
            path = %output_path.display(),
            stations = joined.len(),
            features = collection.len(),
            "wrote forecast GeoJSON"
        );

        Ok(StationOutcome::Written {
            path: output_path.to_path_buf(),
            features: collection.len(),
        })
    }
}

impl Default for StationProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Process one (forecast, observation) export pair into a GeoJSON file
pub fn process_station(
    forecast_path: &Path,
    observation_path: &Path,
    output_path: &Path,
) -> Result<StationOutcome> {
    StationProcessor::new().process(forecast_path, observation_path, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::fs;
    use tempfile::TempDir;

    const FORECAST: &str = "\
Site_Name,Lat,Lon,UTC_DATE,UTC_TIME,AQI_3HR_TCNN,PM25_3HR_TCNN
GSFC,38.99,-76.84,2025-11-24,00:00,48,11.2
GSFC,38.99,-76.84,2025-11-24,03:00,51,12.5
";

    const OBSERVATIONS: &str = "\
Station,Site_Name,UTC_DATE,DAILY_AQI
S1,GSFC,2025-11-24,45
";

    #[test]
    fn test_process_station_writes_geojson() -> Result<()> {
        let dir = TempDir::new()?;
        let forecast = dir.path().join("pred.csv");
        let observations = dir.path().join("aqi.csv");
        let output = dir.path().join("out.geojson");
        fs::write(&forecast, FORECAST)?;
        fs::write(&observations, OBSERVATIONS)?;

        let outcome = process_station(&forecast, &observations, &output)?;

        assert_eq!(
            outcome,
            StationOutcome::Written {
                path: output.clone(),
                features: 1
            }
        );
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
        assert_eq!(json["features"][0]["properties"]["AQI_3HR(03:00)"], 51);
        assert_eq!(json["features"][0]["properties"]["PM25_3HR_CNN(00:00)"], 11.2);
        assert_eq!(json["features"][0]["properties"]["DAILY_AQI"], 45);

        Ok(())
    }

    #[test]
    fn test_insufficient_data_skips_observations() -> Result<()> {
        let dir = TempDir::new()?;
        let forecast = dir.path().join("pred.csv");
        let output = dir.path().join("out.geojson");
        fs::write(&forecast, "Site_Name,Lat,Lon,UTC_DATE,UTC_TIME,AQI_3HR_TCNN\n")?;

        // The observation file does not exist and must not be opened
        let outcome = process_station(&forecast, &dir.path().join("missing.csv"), &output)?;

        assert_eq!(outcome, StationOutcome::InsufficientData);
        assert!(!output.exists());

        Ok(())
    }

    #[test]
    fn test_duplicate_recovery_can_be_disabled() -> Result<()> {
        let dir = TempDir::new()?;
        let forecast = dir.path().join("pred.csv");
        let observations = dir.path().join("aqi.csv");
        let output = dir.path().join("out.geojson");
        fs::write(
            &forecast,
            "Site_Name,Lat,Lon,UTC_DATE,UTC_TIME,AQI_3HR_TCNN,AQI_3HR_TCNN_2,PM25_3HR_TCNN\n\
             GSFC,38.99,-76.84,2025-11-24,00:00,48,48,11.2\n",
        )?;
        fs::write(&observations, OBSERVATIONS)?;

        let processor =
            StationProcessor::new().with_reshaper(ForecastReshaper::with_duplicate_recovery(false));
        processor.process(&forecast, &observations, &output)?;

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
        let properties = json["features"][0]["properties"].as_object().unwrap();
        assert!(properties.contains_key("AQI_3HR(00:00)"));
        assert!(properties.contains_key("AQI_3HR_2(00:00)"));

        Ok(())
    }

    #[test]
    fn test_missing_forecast_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = process_station(
            &dir.path().join("pred.csv"),
            &dir.path().join("aqi.csv"),
            &dir.path().join("out.geojson"),
        );

        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
