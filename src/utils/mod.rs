pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{coerce_coordinate, coordinate_from_cell, parse_coordinate};
pub use filename::{date_stamp, forecast_file_name, observation_file_name, output_file_name};
pub use logging::init_logging;
pub use progress::ProgressReporter;
