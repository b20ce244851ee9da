//! Column classification for forecast and observation exports.
//!
//! Exports do not share a fixed schema, so every column is classified once by
//! name before any transformation touches the data.

use std::collections::HashMap;

use crate::error::{ProcessingError, Result};
use crate::models::Table;
use crate::utils::constants::{
    AQI_MARKER, DAILY_AQI_COLUMN, LATITUDE_COLUMN, LEGACY_MARKER, LONGITUDE_COLUMN,
    MODEL_SUFFIX, SHORT_MODEL_TAG, SITE_NAME_COLUMN, STATION_COLUMN, THREE_HOUR_MARKER,
    TIMESTAMP_MARKER, UTC_DATE_COLUMN, UTC_TIME_COLUMN,
};

pub fn is_legacy_column(name: &str) -> bool {
    name.contains(LEGACY_MARKER)
}

/// A current (non-legacy) 3-hour forecast metric
pub fn is_variable_column(name: &str) -> bool {
    name.contains(THREE_HOUR_MARKER) && !is_legacy_column(name)
}

pub fn is_timestamp_column(name: &str) -> bool {
    name.contains(TIMESTAMP_MARKER) && !name.contains(THREE_HOUR_MARKER)
}

pub fn is_aqi_column(name: &str) -> bool {
    name.contains(AQI_MARKER)
}

pub fn is_daily_aqi_column(name: &str) -> bool {
    name.contains(DAILY_AQI_COLUMN) && !is_legacy_column(name)
}

/// AQI metrics lose the model suffix; other metrics get the short model tag.
///
/// `AQI_3HR_TCNN` becomes `AQI_3HR`, `PM25_3HR_TCNN` becomes `PM25_3HR_CNN`.
pub fn rename_variable(name: &str) -> String {
    if is_aqi_column(name) {
        name.replace(MODEL_SUFFIX, "")
    } else {
        name.replace(MODEL_SUFFIX, SHORT_MODEL_TAG)
    }
}

/// A forecast variable column and the name it is published under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableColumn {
    pub index: usize,
    pub source_name: String,
    pub name: String,
    pub is_aqi: bool,
}

/// First pass over a forecast export: which columns hold what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClassification {
    pub timestamp_columns: Vec<usize>,
    pub variable_columns: Vec<usize>,
}

impl ColumnClassification {
    pub fn classify(columns: &[String]) -> Self {
        let mut timestamp_columns = Vec::new();
        let mut variable_columns = Vec::new();

        for (index, name) in columns.iter().enumerate() {
            if is_variable_column(name) {
                variable_columns.push(index);
            } else if is_timestamp_column(name) {
                timestamp_columns.push(index);
            }
        }

        Self {
            timestamp_columns,
            variable_columns,
        }
    }
}

/// Resolved column layout of a processable forecast export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSchema {
    pub site: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub date: usize,
    pub time: usize,
    pub variables: Vec<VariableColumn>,
}

impl ForecastSchema {
    /// Resolve identity columns and rename the given variable columns.
    ///
    /// Fails if an identity column is missing or if two columns would end up
    /// with the same published name.
    pub fn resolve(table: &Table, variable_columns: &[usize]) -> Result<Self> {
        let site = table.require_column(SITE_NAME_COLUMN)?;
        let latitude = table.require_column(LATITUDE_COLUMN)?;
        let longitude = table.require_column(LONGITUDE_COLUMN)?;
        let date = table.require_column(UTC_DATE_COLUMN)?;
        let time = table.require_column(UTC_TIME_COLUMN)?;

        // Names the renamed variables must not take over
        let mut taken: HashMap<String, String> = [SITE_NAME_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN]
            .iter()
            .map(|c| (c.to_string(), c.to_string()))
            .collect();
        for (index, name) in table.columns().iter().enumerate() {
            if is_timestamp_column(name) && !variable_columns.contains(&index) {
                taken.insert(name.clone(), name.clone());
            }
        }

        let mut variables = Vec::with_capacity(variable_columns.len());
        for &index in variable_columns {
            let source_name = table.columns()[index].clone();
            let name = rename_variable(&source_name);

            if let Some(first) = taken.get(&name) {
                return Err(ProcessingError::ColumnCollision {
                    target: name,
                    first: first.clone(),
                    second: source_name,
                });
            }
            taken.insert(name.clone(), source_name.clone());

            variables.push(VariableColumn {
                index,
                is_aqi: is_aqi_column(&name),
                source_name,
                name,
            });
        }

        Ok(Self {
            site,
            latitude,
            longitude,
            date,
            time,
            variables,
        })
    }

    pub fn group_columns(&self) -> [usize; 4] {
        [self.site, self.latitude, self.longitude, self.date]
    }
}

/// Resolved column layout of a daily AQI export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationSchema {
    pub station: usize,
    pub site: usize,
    pub date: usize,
    pub daily_aqi: usize,
    /// Other current DAILY_AQI columns that were ignored
    pub ignored_aqi_columns: Vec<String>,
}

impl ObservationSchema {
    pub fn discover(table: &Table) -> Result<Self> {
        let station = table.require_column(STATION_COLUMN)?;
        let site = table.require_column(SITE_NAME_COLUMN)?;
        let date = table.require_column(UTC_DATE_COLUMN)?;

        let mut candidates = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| is_daily_aqi_column(name));

        let daily_aqi = candidates.next().map(|(i, _)| i).ok_or_else(|| {
            ProcessingError::MissingData(format!(
                "no current {} column in observations",
                DAILY_AQI_COLUMN
            ))
        })?;
        let ignored_aqi_columns = candidates.map(|(_, name)| name.clone()).collect();

        Ok(Self {
            station,
            site,
            date,
            daily_aqi,
            ignored_aqi_columns,
        })
    }
}
