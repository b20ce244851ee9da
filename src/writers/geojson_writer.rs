//! GeoJSON point collections.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc7946>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Table;
use crate::utils::coordinates::coordinate_from_cell;

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature with flat properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: Geometry,

    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: Geometry::point(lon, lat),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }
}

/// Turn every row with usable coordinates into a Point feature.
///
/// All other columns become properties in column order with their native
/// JSON types. Rows with a missing or non-numeric coordinate are skipped.
pub fn to_geojson(table: &Table, lat_col: &str, lon_col: &str) -> Result<FeatureCollection> {
    let lat_index = table.require_column(lat_col)?;
    let lon_index = table.require_column(lon_col)?;

    let features = table
        .rows()
        .iter()
        .filter_map(|row| {
            let lat = coordinate_from_cell(&row[lat_index])?;
            let lon = coordinate_from_cell(&row[lon_index])?;

            let properties = table
                .columns()
                .iter()
                .zip(row)
                .enumerate()
                .filter(|(i, _)| *i != lat_index && *i != lon_index)
                .map(|(_, (name, cell))| (name.clone(), Value::from(cell)))
                .collect();

            Some(Feature {
                properties,
                ..Feature::point(lon, lat)
            })
        })
        .collect();

    Ok(FeatureCollection::new().with_features(features))
}

pub struct GeoJsonWriter;

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write a collection as 2-space indented UTF-8 JSON
    pub fn write(&self, collection: &FeatureCollection, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, collection)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
