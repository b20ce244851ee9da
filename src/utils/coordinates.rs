use crate::error::{ProcessingError, Result};
use crate::models::CellValue;

/// Parse a decimal-degree coordinate
///
/// # Examples
/// ```
/// use aqi_forecast::utils::coordinates::parse_coordinate;
///
/// let lat = parse_coordinate(" 38.9925 ").unwrap();
/// assert!((lat - 38.9925).abs() < 1e-9);
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProcessingError::InvalidCoordinate(format!(
            "Invalid coordinate value: '{}'",
            coord_str
        ))),
    }
}

/// Coerce a coordinate, turning anything unparseable into a missing value
pub fn coerce_coordinate(coord_str: &str) -> Option<f64> {
    parse_coordinate(coord_str).ok()
}

/// Read a coordinate out of a table cell
pub fn coordinate_from_cell(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Text(s) => coerce_coordinate(s),
        other => other.as_f64().filter(|v| v.is_finite()),
    }
}
