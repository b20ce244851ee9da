pub mod catalog;
pub mod joiner;
pub mod pipeline;
pub mod reshaper;
pub mod schema;

pub use catalog::{CatalogSummary, StationCatalogBuilder};
pub use joiner::ObservationJoiner;
pub use pipeline::{process_station, StationOutcome, StationProcessor};
pub use reshaper::ForecastReshaper;
pub use schema::{ColumnClassification, ForecastSchema, ObservationSchema, VariableColumn};
