use crate::error::{ProcessingError, Result};
use crate::models::{CellValue, Table, WideForecastTable};
use crate::processors::schema::ObservationSchema;
use crate::utils::constants::{DAILY_AQI_COLUMN, SITE_NAME_COLUMN, STATION_COLUMN, UTC_DATE_COLUMN};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One selected row of the daily AQI export
struct Observation {
    station: CellValue,
    daily_aqi: CellValue,
}

/// Attaches observed daily AQI to reshaped forecasts.
pub struct ObservationJoiner;

impl ObservationJoiner {
    pub fn new() -> Self {
        Self
    }

    /// Inner join on (Site_Name, UTC_DATE).
    ///
    /// The result starts with `Station`, ends with `DAILY_AQI` and is sorted
    /// by station, keeping the join order for equal stations.
    pub fn join(&self, wide: &WideForecastTable, observations: &Table) -> Result<Table> {
        let forecast = wide.table();
        let schema = ObservationSchema::discover(observations)?;
        if !schema.ignored_aqi_columns.is_empty() {
            warn!(
                used = %observations.columns()[schema.daily_aqi],
                ignored = ?schema.ignored_aqi_columns,
                "observations carry several daily AQI columns"
            );
        }

        for reserved in [STATION_COLUMN, DAILY_AQI_COLUMN] {
            if forecast.column_index(reserved).is_some() {
                return Err(ProcessingError::ColumnCollision {
                    target: reserved.to_string(),
                    first: reserved.to_string(),
                    second: format!("observation {}", reserved),
                });
            }
        }

        let index = self.index_observations(observations, &schema);

        let site_col = forecast.require_column(SITE_NAME_COLUMN)?;
        let date_col = forecast.require_column(UTC_DATE_COLUMN)?;

        let mut columns = forecast.columns().to_vec();
        columns.push(STATION_COLUMN.to_string());
        columns.push(DAILY_AQI_COLUMN.to_string());
        let mut joined = Table::new(columns);

        for row in forecast.rows() {
            let key = (row[site_col].clone(), row[date_col].clone());
            let Some(matches) = index.get(&key) else {
                continue;
            };
            for observation in matches {
                let mut joined_row = row.clone();
                joined_row.push(observation.station.clone());
                joined_row.push(observation.daily_aqi.clone());
                joined.push_row(joined_row)?;
            }
        }

        if joined.is_empty() {
            warn!(
                forecast_rows = forecast.len(),
                observation_rows = observations.len(),
                "no forecast rows matched an observation"
            );
        } else {
            debug!(rows = joined.len(), "joined forecasts with observations");
        }

        joined.move_column_to_front(STATION_COLUMN)?;
        joined.sort_by_column(STATION_COLUMN)?;
        Ok(joined)
    }

    fn index_observations(
        &self,
        observations: &Table,
        schema: &ObservationSchema,
    ) -> BTreeMap<(CellValue, CellValue), Vec<Observation>> {
        let daily_aqi = observations.column_values(schema.daily_aqi);
        let narrowed: Option<Vec<CellValue>> = daily_aqi.map(CellValue::narrowed_to_integer).collect();
        let aqi_values: Vec<CellValue> = match narrowed {
            Some(values) => values,
            None => observations.column_values(schema.daily_aqi).cloned().collect(),
        };

        let mut index: BTreeMap<(CellValue, CellValue), Vec<Observation>> = BTreeMap::new();
        for (row, daily_aqi) in observations.rows().iter().zip(aqi_values) {
            index
                .entry((row[schema.site].clone(), row[schema.date].clone()))
                .or_default()
                .push(Observation {
                    station: row[schema.station].clone(),
                    daily_aqi,
                });
        }
        index
    }
}

impl Default for ObservationJoiner {
    fn default() -> Self {
        Self::new()
    }
}
