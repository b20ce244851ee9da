use chrono::NaiveDate;

use crate::utils::constants::{
    DATE_STAMP_FORMAT, FORECAST_FILE_STEM, MODEL_SUFFIX, OBSERVATION_FILE_STEM,
    OUTPUT_FILE_SUFFIX,
};

/// Format a processing date as YYYYMMDD
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}

fn export_file_name(date: NaiveDate, stem: &str, model_tagged: bool) -> String {
    let tag = if model_tagged { MODEL_SUFFIX } else { "" };
    format!("{}_{}{}.csv", date_stamp(date), stem, tag)
}

/// Forecast export name: `{YYYYMMDD}_pred[_TCNN].csv`
pub fn forecast_file_name(date: NaiveDate, model_tagged: bool) -> String {
    export_file_name(date, FORECAST_FILE_STEM, model_tagged)
}

/// Daily AQI export name: `{YYYYMMDD}_aqi[_TCNN].csv`
pub fn observation_file_name(date: NaiveDate, model_tagged: bool) -> String {
    export_file_name(date, OBSERVATION_FILE_STEM, model_tagged)
}

/// GeoJSON output name: `{YYYYMMDD}_forecast.geojson`
pub fn output_file_name(date: NaiveDate) -> String {
    format!("{}{}", date_stamp(date), OUTPUT_FILE_SUFFIX)
}
