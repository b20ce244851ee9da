use crate::error::Result;
use crate::models::{CellValue, Table};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Type inferred for a whole CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every cell is missing
    Empty,
    Integer,
    Float,
    Text,
}

impl ColumnType {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut column_type = ColumnType::Empty;

        for raw in cells {
            if CellValue::is_null_marker(raw) {
                continue;
            }
            let trimmed = raw.trim();
            column_type = match column_type {
                ColumnType::Empty | ColumnType::Integer if trimmed.parse::<i64>().is_ok() => {
                    ColumnType::Integer
                }
                ColumnType::Empty | ColumnType::Integer | ColumnType::Float
                    if trimmed.parse::<f64>().is_ok() =>
                {
                    ColumnType::Float
                }
                _ => return ColumnType::Text,
            };
        }

        column_type
    }

    fn convert(&self, raw: &str) -> CellValue {
        if CellValue::is_null_marker(raw) {
            return CellValue::Null;
        }
        let trimmed = raw.trim();
        match self {
            ColumnType::Empty => CellValue::Null,
            ColumnType::Integer => trimmed
                .parse::<i64>()
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Null),
            ColumnType::Float => trimmed
                .parse::<f64>()
                .map(CellValue::Float)
                .unwrap_or(CellValue::Null),
            ColumnType::Text => CellValue::Text(raw.to_string()),
        }
    }
}

/// Reads CSV exports into dynamically typed tables.
///
/// Column types are inferred over the whole file: a column is integral only
/// if every present value is, floating point if every present value parses
/// as a number, and text otherwise.
pub struct TableReader {
    delimiter: u8,
}

impl TableReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim_start_matches('\u{feff}');
                if name.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut raw_rows = Vec::new();
        for record in csv_reader.records() {
            raw_rows.push(record?);
        }

        let column_types: Vec<ColumnType> = (0..columns.len())
            .map(|i| ColumnType::infer(raw_rows.iter().map(|r| r.get(i).unwrap_or(""))))
            .collect();

        let mut table = Table::new(columns);
        for record in &raw_rows {
            let row = column_types
                .iter()
                .enumerate()
                .map(|(i, column_type)| column_type.convert(record.get(i).unwrap_or("")))
                .collect();
            table.push_row(row)?;
        }

        Ok(table)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_column_type_inference() {
        let csv = "Site_Name,Lat,Count,AQI_3HR_TCNN\n\
                   GSFC,38.99,1,42\n\
                   Beijing,39.9,2,\n\
                   Delhi,28.6,3,17.5\n";
        let table = TableReader::new().read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "Site_Name"), Some(&CellValue::from("GSFC")));
        assert_eq!(table.get(0, "Lat"), Some(&CellValue::Float(38.99)));
        assert_eq!(table.get(1, "Count"), Some(&CellValue::Integer(2)));
        // One fractional value makes the whole column floating point
        assert_eq!(table.get(0, "AQI_3HR_TCNN"), Some(&CellValue::Float(42.0)));
        assert_eq!(table.get(1, "AQI_3HR_TCNN"), Some(&CellValue::Null));
    }

    #[test]
    fn test_mixed_column_is_text() {
        let csv = "Station,Value\n001,5\nA02,NaN\n";
        let table = TableReader::new().read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.get(0, "Station"), Some(&CellValue::from("001")));
        assert_eq!(table.get(1, "Station"), Some(&CellValue::from("A02")));
        assert_eq!(table.get(1, "Value"), Some(&CellValue::Null));
    }

    #[test]
    fn test_unnamed_and_bom_headers() {
        let csv = "\u{feff},Site_Name\n0,GSFC\n";
        let table = TableReader::new().read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["Unnamed: 0".to_string(), "Site_Name".to_string()]);
    }

    #[test]
    fn test_header_only_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "Site_Name,Lat,Lon,UTC_DATE,UTC_TIME")?;

        let table = TableReader::new().read_table(temp_file.path())?;
        assert!(table.is_empty());
        assert_eq!(table.width(), 5);

        Ok(())
    }

    #[test]
    fn test_spreadsheet_missing_markers_keep_column_numeric() {
        let csv = "Site_Name,AQI_3HR_TCNN,PM25_3HR_TCNN\n\
                   GSFC,48,#N/A\n\
                   Delhi,n/a,12.5\n\
                   Accra,<NA>,1.#QNAN\n";
        let table = TableReader::new().read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.get(0, "AQI_3HR_TCNN"), Some(&CellValue::Integer(48)));
        assert_eq!(table.get(1, "AQI_3HR_TCNN"), Some(&CellValue::Null));
        assert_eq!(table.get(2, "AQI_3HR_TCNN"), Some(&CellValue::Null));
        assert_eq!(table.get(0, "PM25_3HR_TCNN"), Some(&CellValue::Null));
        assert_eq!(table.get(1, "PM25_3HR_TCNN"), Some(&CellValue::Float(12.5)));
        assert_eq!(table.get(2, "PM25_3HR_TCNN"), Some(&CellValue::Null));
    }

    #[test]
    fn test_semicolon_delimited_export() {
        let csv = "Site_Name;DAILY_AQI\nGSFC;45\n";
        let table = TableReader::with_delimiter(b';').read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.get(0, "DAILY_AQI"), Some(&CellValue::Integer(45)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let csv = "a,b\n1,2,3\n";
        assert!(TableReader::new().read_from(csv.as_bytes()).is_err());
    }
}
