pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
pub use processors::{process_station, StationOutcome};
