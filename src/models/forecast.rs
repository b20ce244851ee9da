use crate::models::Table;

/// Forecast values pivoted to one row per (Site_Name, Lat, Lon, UTC_DATE).
///
/// Besides the identity columns the table holds one `variable(time)` column
/// for every variable and every time-of-day seen in the export.
#[derive(Debug, Clone, PartialEq)]
pub struct WideForecastTable {
    table: Table,
    variables: Vec<String>,
    times: Vec<String>,
}

impl WideForecastTable {
    pub fn new(table: Table, variables: Vec<String>, times: Vec<String>) -> Self {
        Self {
            table,
            variables,
            times,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Renamed variable names in export order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Distinct times of day, ascending
    pub fn times(&self) -> &[String] {
        &self.times
    }
}

/// Result of reshaping one forecast export.
#[derive(Debug, Clone, PartialEq)]
pub enum ReshapeOutcome {
    Produced(WideForecastTable),
    /// Too few variable columns or no rows; the run is skipped
    InsufficientData,
}

impl ReshapeOutcome {
    pub fn is_produced(&self) -> bool {
        matches!(self, ReshapeOutcome::Produced(_))
    }
}
