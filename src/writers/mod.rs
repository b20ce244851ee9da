pub mod catalog_writer;
pub mod geojson_writer;

pub use catalog_writer::CatalogWriter;
pub use geojson_writer::{to_geojson, Feature, FeatureCollection, GeoJsonWriter, Geometry};
