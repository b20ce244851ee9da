pub mod cell;
pub mod forecast;
pub mod network;
pub mod station;
pub mod table;

pub use cell::CellValue;
pub use forecast::{ReshapeOutcome, WideForecastTable};
pub use network::Network;
pub use station::StationEntry;
pub use table::Table;
