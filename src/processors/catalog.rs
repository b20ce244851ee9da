use crate::config::CatalogSource;
use crate::error::Result;
use crate::models::StationEntry;
use crate::readers::station_reader::sanitize_field;
use crate::readers::StationReader;
use crate::writers::CatalogWriter;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total_stations: usize,
    pub mapped_stations: usize,
    pub per_network: Vec<(String, usize)>,
}

impl CatalogSummary {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Station Catalog ===\n");
        for (network, count) in &self.per_network {
            summary.push_str(&format!("{}: {} stations\n", network, count));
        }
        summary.push_str(&format!("Total Stations: {}\n", self.total_stations));
        summary.push_str(&format!(
            "Placed on Map: {} ({} without usable coordinates)\n",
            self.mapped_stations,
            self.total_stations - self.mapped_stations
        ));
        summary
    }
}

/// Concatenates station tables from every network into one catalog.
pub struct StationCatalogBuilder {
    sources: Vec<CatalogSource>,
    reader: StationReader,
}

impl StationCatalogBuilder {
    pub fn new(sources: Vec<CatalogSource>) -> Self {
        Self {
            sources,
            reader: StationReader::new(),
        }
    }

    /// Stations of every source, in source order
    pub fn build(&self) -> Result<Vec<StationEntry>> {
        let mut stations = Vec::new();
        for source in &self.sources {
            stations.extend(self.reader.read_source(source)?);
        }
        Ok(stations)
    }

    pub fn build_and_write(&self, csv_path: &Path, geojson_path: &Path) -> Result<CatalogSummary> {
        let stations = self.build()?;

        let writer = CatalogWriter::new();
        writer.write_csv(&stations, csv_path)?;
        let mapped_stations = writer.write_geojson(&stations, geojson_path)?;

        let per_network = self
            .sources
            .iter()
            .map(|source| {
                let count = stations
                    .iter()
                    .filter(|s| s.forecast == sanitize_field(&source.label))
                    .count();
                (source.label.clone(), count)
            })
            .collect();

        info!(
            stations = stations.len(),
            mapped = mapped_stations,
            csv = %csv_path.display(),
            geojson = %geojson_path.display(),
            "wrote station catalog"
        );

        Ok(CatalogSummary {
            total_stations: stations.len(),
            mapped_stations,
            per_network,
        })
    }
}
