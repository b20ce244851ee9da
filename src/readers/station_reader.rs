use crate::config::CatalogSource;
use crate::error::{ProcessingError, Result};
use crate::models::StationEntry;
use crate::utils::constants::{CATALOG_LATITUDE_COLUMN, CATALOG_LONGITUDE_COLUMN, CATALOG_SITE_COLUMN};
use crate::utils::coordinates::coerce_coordinate;
use encoding_rs::WINDOWS_1252;
use std::path::Path;
use tracing::{debug, warn};

/// Reads per-network station metadata tables.
///
/// The station files are Latin-1 exports from spreadsheets, so they are
/// decoded before CSV parsing.
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read one catalog source and label every station with its network
    pub fn read_source(&self, source: &CatalogSource) -> Result<Vec<StationEntry>> {
        let bytes = std::fs::read(&source.path)?;
        let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
        if had_errors {
            warn!(path = %source.path.display(), "station file contains undecodable bytes");
        }

        let stations = self.parse_stations(&text, source)?;
        debug!(
            path = %source.path.display(),
            network = %source.label,
            count = stations.len(),
            "read station source"
        );
        Ok(stations)
    }

    fn parse_stations(&self, text: &str, source: &CatalogSource) -> Result<Vec<StationEntry>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let site_idx = find_column(&headers, CATALOG_SITE_COLUMN, &source.path)?;
        let lat_idx = find_column(&headers, CATALOG_LATITUDE_COLUMN, &source.path)?;
        let lon_idx = find_column(&headers, CATALOG_LONGITUDE_COLUMN, &source.path)?;

        let mut stations = Vec::new();
        for record in reader.records() {
            let record = record?;
            let raw_name = record.get(site_idx).unwrap_or("");
            let name = if source.normalize_site_names {
                normalize_site_name(raw_name)
            } else {
                raw_name.to_string()
            };

            stations.push(StationEntry::new(
                sanitize_field(&name),
                record.get(lat_idx).and_then(coerce_coordinate),
                record.get(lon_idx).and_then(coerce_coordinate),
                sanitize_field(&source.label),
            ));
        }

        Ok(stations)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn find_column(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| {
            ProcessingError::MissingData(format!(
                "column '{}' not found in {}",
                name,
                path.display()
            ))
        })
}

/// AERONET site names use hyphens where the forecast exports use underscores
pub fn normalize_site_name(name: &str) -> String {
    name.replace('-', "_").trim().to_string()
}

/// Commas would split the catalog CSV for naive consumers
pub fn sanitize_field(value: &str) -> String {
    value.replace(',', ";")
}
