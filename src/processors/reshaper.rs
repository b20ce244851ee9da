use crate::error::{ProcessingError, Result};
use crate::models::{CellValue, ReshapeOutcome, Table, WideForecastTable};
use crate::processors::schema::{ColumnClassification, ForecastSchema};
use crate::utils::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN, SITE_NAME_COLUMN, UTC_DATE_COLUMN};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Number of leading identity columns in a wide forecast table
pub const IDENTITY_WIDTH: usize = 4;

/// Minimum number of variable columns for a usable forecast
const MIN_VARIABLE_COLUMNS: usize = 2;

/// Pivots one forecast export from one row per timestamp to one row per
/// station and day.
pub struct ForecastReshaper {
    recover_duplicate_columns: bool,
}

impl ForecastReshaper {
    pub fn new() -> Self {
        Self {
            recover_duplicate_columns: true,
        }
    }

    /// Toggle the workaround for exports that repeat their first variable column
    pub fn with_duplicate_recovery(recover_duplicate_columns: bool) -> Self {
        Self {
            recover_duplicate_columns,
        }
    }

    pub fn reshape(&self, table: &Table) -> Result<ReshapeOutcome> {
        let classification = ColumnClassification::classify(table.columns());
        let mut variable_columns = classification.variable_columns;

        // Some producers emit the leading metric twice
        if self.recover_duplicate_columns && variable_columns.len() > MIN_VARIABLE_COLUMNS {
            let dropped = variable_columns.remove(0);
            warn!(
                column = %table.columns()[dropped],
                remaining = variable_columns.len(),
                "dropping leading forecast column from export with extra variable columns"
            );
        }

        if variable_columns.len() < MIN_VARIABLE_COLUMNS || table.is_empty() {
            debug!(
                variables = variable_columns.len(),
                rows = table.len(),
                "not enough forecast data to reshape"
            );
            return Ok(ReshapeOutcome::InsufficientData);
        }

        let schema = ForecastSchema::resolve(table, &variable_columns)?;
        let wide = self.pivot(table, &schema)?;
        Ok(ReshapeOutcome::Produced(wide))
    }

    fn pivot(&self, table: &Table, schema: &ForecastSchema) -> Result<WideForecastTable> {
        // group key -> (time of day -> source row)
        let mut groups: BTreeMap<Vec<CellValue>, BTreeMap<CellValue, usize>> = BTreeMap::new();
        let mut times = BTreeSet::new();

        for (row_index, row) in table.rows().iter().enumerate() {
            let time = &row[schema.time];
            if time.is_null() {
                debug!(row = row_index, "skipping forecast row without a time of day");
                continue;
            }

            let key: Vec<CellValue> = schema
                .group_columns()
                .iter()
                .map(|&i| row[i].clone())
                .collect();

            if groups
                .entry(key)
                .or_default()
                .insert(time.clone(), row_index)
                .is_some()
            {
                return Err(ProcessingError::DuplicateEntry {
                    site: row[schema.site].to_string(),
                    date: row[schema.date].to_string(),
                    time: time.to_string(),
                });
            }
            times.insert(time.clone());
        }

        let times: Vec<CellValue> = times.into_iter().collect();

        let mut columns: Vec<String> = [SITE_NAME_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN, UTC_DATE_COLUMN]
            .iter()
            .map(|c| c.to_string())
            .collect();
        for variable in &schema.variables {
            for time in &times {
                columns.push(format!("{}({})", variable.name, time));
            }
        }

        let mut wide = Table::new(columns);
        for (key, slots) in groups {
            let mut row = key;
            for variable in &schema.variables {
                for time in &times {
                    let value = match slots.get(time) {
                        Some(&source_row) => {
                            let cell = &table.rows()[source_row][variable.index];
                            if variable.is_aqi {
                                cell.clone()
                            } else {
                                cell.to_float()
                            }
                        }
                        None => CellValue::Null,
                    };
                    row.push(value);
                }
            }
            wide.push_row(row)?;
        }

        // All AQI columns narrow together or not at all
        let aqi_columns: Vec<usize> = schema
            .variables
            .iter()
            .enumerate()
            .filter(|(_, variable)| variable.is_aqi)
            .flat_map(|(position, _)| {
                let start = IDENTITY_WIDTH + position * times.len();
                start..start + times.len()
            })
            .collect();
        if !wide.narrow_columns_to_integer(&aqi_columns) {
            debug!(columns = aqi_columns.len(), "AQI columns are not all integral, left as is");
        }

        let variables = schema.variables.iter().map(|v| v.name.clone()).collect();
        let times = times.iter().map(|t| t.to_string()).collect();
        Ok(WideForecastTable::new(wide, variables, times))
    }
}

impl Default for ForecastReshaper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: [&str; 7] = [
        "Site_Name",
        "Lat",
        "Lon",
        "UTC_DATE",
        "UTC_TIME",
        "AQI_3HR_TCNN",
        "PM25_3HR_TCNN",
    ];

    fn forecast_table(header: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::with_rows(header.iter().map(|s| s.to_string()).collect(), rows).unwrap()
    }

    fn reading(site: &str, lat: f64, date: &str, time: &str, aqi: f64, pm: f64) -> Vec<CellValue> {
        vec![
            site.into(),
            CellValue::Float(lat),
            CellValue::Float(lat / 2.0),
            date.into(),
            time.into(),
            CellValue::Float(aqi),
            CellValue::Float(pm),
        ]
    }

    fn produced(outcome: ReshapeOutcome) -> WideForecastTable {
        match outcome {
            ReshapeOutcome::Produced(wide) => wide,
            ReshapeOutcome::InsufficientData => panic!("expected a reshaped table"),
        }
    }

    #[test]
    fn test_pivot_dimensions() {
        let sites = [("GSFC", 38.99), ("Delhi", 28.6)];
        let dates = ["2025-11-24", "2025-11-25"];
        let times = ["00:00", "03:00", "06:00"];

        let mut rows = Vec::new();
        for (site, lat) in sites {
            for date in dates {
                for time in times {
                    rows.push(reading(site, lat, date, time, 50.0, 12.5));
                }
            }
        }

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows)).unwrap());

        assert_eq!(wide.table().len(), sites.len() * dates.len());
        assert_eq!(wide.table().width(), IDENTITY_WIDTH + 2 * times.len());
        assert_eq!(wide.times(), &["00:00", "03:00", "06:00"]);
    }

    #[test]
    fn test_column_names_and_types() {
        let rows = vec![
            reading("GSFC", 38.99, "2025-11-24", "03:00", 51.0, 12.5),
            reading("GSFC", 38.99, "2025-11-24", "00:00", 48.0, 11.0),
        ];

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows)).unwrap());
        let table = wide.table();

        assert_eq!(
            table.columns(),
            &[
                "Site_Name",
                "Lat",
                "Lon",
                "UTC_DATE",
                "AQI_3HR(00:00)",
                "AQI_3HR(03:00)",
                "PM25_3HR_CNN(00:00)",
                "PM25_3HR_CNN(03:00)",
            ]
        );
        assert_eq!(wide.variables(), &["AQI_3HR", "PM25_3HR_CNN"]);
        assert_eq!(table.get(0, "AQI_3HR(00:00)"), Some(&CellValue::Integer(48)));
        assert_eq!(table.get(0, "AQI_3HR(03:00)"), Some(&CellValue::Integer(51)));
        assert_eq!(table.get(0, "PM25_3HR_CNN(00:00)"), Some(&CellValue::Float(11.0)));
    }

    #[test]
    fn test_missing_combinations_are_null() {
        let rows = vec![
            reading("GSFC", 38.99, "2025-11-24", "00:00", 48.0, 11.0),
            reading("GSFC", 38.99, "2025-11-24", "03:00", 51.0, 12.5),
            reading("Delhi", 28.6, "2025-11-24", "00:00", 160.0, 70.0),
        ];

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows)).unwrap());
        let table = wide.table();

        // Groups are ordered by site name
        assert_eq!(table.get(0, "Site_Name"), Some(&CellValue::from("Delhi")));
        assert_eq!(table.get(0, "AQI_3HR(03:00)"), Some(&CellValue::Null));
        assert_eq!(table.get(0, "PM25_3HR_CNN(03:00)"), Some(&CellValue::Null));
        assert_eq!(table.get(0, "AQI_3HR(00:00)"), Some(&CellValue::Integer(160)));
    }

    #[test]
    fn test_fractional_aqi_is_left_as_float() {
        let rows = vec![
            reading("GSFC", 38.99, "2025-11-24", "00:00", 48.5, 11.0),
            reading("Delhi", 28.6, "2025-11-24", "00:00", 160.0, 70.0),
        ];

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows)).unwrap());

        assert_eq!(wide.table().get(0, "AQI_3HR(00:00)"), Some(&CellValue::Float(160.0)));
        assert_eq!(wide.table().get(1, "AQI_3HR(00:00)"), Some(&CellValue::Float(48.5)));
    }

    #[test]
    fn test_one_fractional_slot_keeps_every_aqi_column_float() {
        let rows = vec![
            reading("GSFC", 38.99, "2025-11-24", "00:00", 48.0, 11.0),
            reading("GSFC", 38.99, "2025-11-24", "03:00", 51.5, 12.5),
        ];

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows)).unwrap());

        assert_eq!(wide.table().get(0, "AQI_3HR(00:00)"), Some(&CellValue::Float(48.0)));
        assert_eq!(wide.table().get(0, "AQI_3HR(03:00)"), Some(&CellValue::Float(51.5)));
    }

    #[test]
    fn test_single_variable_is_insufficient() {
        let header = ["Site_Name", "Lat", "Lon", "UTC_DATE", "UTC_TIME", "AQI_3HR_TCNN"];
        let rows = vec![vec![
            "GSFC".into(),
            CellValue::Float(38.99),
            CellValue::Float(-76.84),
            "2025-11-24".into(),
            "00:00".into(),
            CellValue::Integer(48),
        ]];

        let outcome = ForecastReshaper::new().reshape(&forecast_table(&header, rows)).unwrap();
        assert_eq!(outcome, ReshapeOutcome::InsufficientData);
    }

    #[test]
    fn test_empty_table_is_insufficient() {
        let outcome = ForecastReshaper::new().reshape(&forecast_table(&HEADER, vec![])).unwrap();
        assert!(!outcome.is_produced());
    }

    #[test]
    fn test_legacy_columns_do_not_count() {
        let header = ["Site_Name", "Lat", "Lon", "UTC_DATE", "UTC_TIME", "AQI_3HR_TCNN", "AQI_3HR_OLD"];
        let rows = vec![vec![
            "GSFC".into(),
            CellValue::Float(38.99),
            CellValue::Float(-76.84),
            "2025-11-24".into(),
            "00:00".into(),
            CellValue::Integer(48),
            CellValue::Integer(40),
        ]];

        let outcome = ForecastReshaper::new().reshape(&forecast_table(&header, rows)).unwrap();
        assert_eq!(outcome, ReshapeOutcome::InsufficientData);
    }

    #[test]
    fn test_leading_duplicate_column_is_dropped() {
        let header = [
            "Site_Name",
            "Lat",
            "Lon",
            "UTC_DATE",
            "UTC_TIME",
            "PM25_3HR_TCNN",
            "AQI_3HR_TCNN",
            "PM25_3HR_TCNN_1",
        ];
        let rows = vec![vec![
            "GSFC".into(),
            CellValue::Float(38.99),
            CellValue::Float(-76.84),
            "2025-11-24".into(),
            "00:00".into(),
            CellValue::Float(1.0),
            CellValue::Integer(48),
            CellValue::Float(12.0),
        ]];

        let wide = produced(ForecastReshaper::new().reshape(&forecast_table(&header, rows)).unwrap());

        assert_eq!(wide.variables(), &["AQI_3HR", "PM25_3HR_CNN_1"]);
        assert_eq!(wide.table().get(0, "PM25_3HR_CNN_1(00:00)"), Some(&CellValue::Float(12.0)));
    }

    #[test]
    fn test_duplicate_timestamp_is_an_error() {
        let rows = vec![
            reading("GSFC", 38.99, "2025-11-24", "00:00", 48.0, 11.0),
            reading("GSFC", 38.99, "2025-11-24", "00:00", 49.0, 11.5),
        ];

        let result = ForecastReshaper::new().reshape(&forecast_table(&HEADER, rows));
        assert!(matches!(result, Err(ProcessingError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_rename_collision_fails_loudly() {
        let header = ["Site_Name", "Lat", "Lon", "UTC_DATE", "UTC_TIME", "AQI_3HR_TCNN", "AQI_3HR"];
        let rows = vec![vec![
            "GSFC".into(),
            CellValue::Float(38.99),
            CellValue::Float(-76.84),
            "2025-11-24".into(),
            "00:00".into(),
            CellValue::Integer(48),
            CellValue::Integer(48),
        ]];

        let result = ForecastReshaper::new().reshape(&forecast_table(&header, rows));
        assert!(matches!(result, Err(ProcessingError::ColumnCollision { .. })));
    }
}
