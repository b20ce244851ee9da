use crate::error::{ProcessingError, Result};
use crate::models::CellValue;

/// A row-major table whose column set is only known at runtime.
///
/// Every row always holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ProcessingError::MissingData(format!("column '{}' not found", name)))
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Look up a cell by row position and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Convert a set of columns to nullable integers in one step.
    ///
    /// The columns are rewritten only when every value of every column
    /// narrows; otherwise all of them are left untouched and `false` is
    /// returned.
    pub fn narrow_columns_to_integer(&mut self, indices: &[usize]) -> bool {
        let mut narrowed = Vec::with_capacity(indices.len());
        for &index in indices {
            let values: Option<Vec<CellValue>> = self
                .column_values(index)
                .map(CellValue::narrowed_to_integer)
                .collect();
            match values {
                Some(values) => narrowed.push((index, values)),
                None => return false,
            }
        }

        for (index, values) in narrowed {
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[index] = value;
            }
        }
        true
    }

    pub fn move_column_to_front(&mut self, name: &str) -> Result<()> {
        let index = self.require_column(name)?;
        let column = self.columns.remove(index);
        self.columns.insert(0, column);
        for row in &mut self.rows {
            let cell = row.remove(index);
            row.insert(0, cell);
        }
        Ok(())
    }

    /// Stable ascending sort on a single column, nulls last.
    pub fn sort_by_column(&mut self, name: &str) -> Result<()> {
        let index = self.require_column(name)?;
        self.rows.sort_by(|a, b| a[index].cmp(&b[index]));
        Ok(())
    }
}
