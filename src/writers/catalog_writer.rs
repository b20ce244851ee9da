use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::StationEntry;
use crate::utils::constants::{CATALOG_NETWORK_COLUMN, CATALOG_SITE_COLUMN};
use crate::writers::geojson_writer::{Feature, FeatureCollection, GeoJsonWriter};

/// Writes the unified station catalog as CSV and as GeoJSON.
pub struct CatalogWriter;

impl CatalogWriter {
    pub fn new() -> Self {
        Self
    }

    /// Every entry, including those without usable coordinates
    pub fn write_csv(&self, stations: &[StationEntry], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for station in stations {
            writer.serialize(station)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_feature_collection(&self, stations: &[StationEntry]) -> FeatureCollection {
        let features = stations
            .iter()
            .filter_map(|station| {
                let Some((lon, lat)) = station.location() else {
                    debug!(site = %station.sitename, "station has no usable location");
                    return None;
                };
                Some(
                    Feature::point(lon, lat)
                        .with_property(CATALOG_SITE_COLUMN, Value::String(station.sitename.clone()))
                        .with_property(CATALOG_NETWORK_COLUMN, Value::String(station.forecast.clone())),
                )
            })
            .collect();

        FeatureCollection::new().with_features(features)
    }

    /// Returns the number of stations placed on the map
    pub fn write_geojson(&self, stations: &[StationEntry], path: &Path) -> Result<usize> {
        let collection = self.to_feature_collection(stations);
        GeoJsonWriter::new().write(&collection, path)?;
        Ok(collection.len())
    }
}

impl Default for CatalogWriter {
    fn default() -> Self {
        Self::new()
    }
}
