use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the unified station catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationEntry {
    pub sitename: String,

    #[serde(rename = "Latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[serde(rename = "Forecast")]
    pub forecast: String,
}

impl StationEntry {
    pub fn new(
        sitename: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        forecast: String,
    ) -> Self {
        Self {
            sitename,
            latitude,
            longitude,
            forecast,
        }
    }

    /// The (longitude, latitude) pair when both are present and in range.
    ///
    /// Only the coordinates decide placement; the site name may be empty.
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) if self.validate().is_ok() => Some((lon, lat)),
            _ => None,
        }
    }
}
