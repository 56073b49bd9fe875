pub mod columns;

use std::fmt;

use chrono::NaiveDate;

use crate::skillset::census::error::{Result, ToolError};

/// Display pattern used for every date the census writes out as text.
pub const DATE_PATTERN: &str = "%m/%d/%Y";

/// Represents a single spreadsheet cell in the census table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell; the equivalent of a null field.
    #[default]
    Empty,
    /// Plain string value.
    Text(String),
    /// Numeric value, including integers read from the sheet.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Calendar date that has not been rendered to text yet.
    Date(NaiveDate),
}

impl CellValue {
    /// Convenience constructor for text cells.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Returns `true` for blank cells and whitespace-only strings.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text content of a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the numeric content of a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Date(date) => write!(f, "{}", date.format(DATE_PATTERN)),
        }
    }
}

/// In-memory census: named columns in sheet order and one row per employee
/// record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CensusTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl CensusTable {
    /// Creates an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a record. Short rows are padded with empty cells and cells
    /// beyond the header are dropped.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
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

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Looks up a column that a cleaning step needs to read.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ToolError::MissingColumn(name.to_string()))
    }

    /// Returns the index of `name`, appending an all-empty column first when
    /// the table does not have it yet.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(CellValue::Empty);
        }
        self.columns.len() - 1
    }

    /// Renames a column in place. Returns `false` when `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(index) => {
                self.columns[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a column and its cells. Returns `false` when it does not exist.
    pub fn remove_column(&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(index) => {
                self.columns.remove(index);
                for row in &mut self.rows {
                    row.remove(index);
                }
                true
            }
            None => false,
        }
    }

    pub fn get(&self, row: usize, column: usize) -> &CellValue {
        &self.rows[row][column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: CellValue) {
        self.rows[row][column] = value;
    }

    /// Looks up a cell by column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[index])
    }

    /// Replaces every missing cell of `column` with `value`.
    pub fn fill_missing(&mut self, column: usize, value: &CellValue) {
        for row in &mut self.rows {
            if row[column].is_missing() {
                row[column] = value.clone();
            }
        }
    }

    /// Overwrites every cell of `column` with `value`.
    pub fn fill_all(&mut self, column: usize, value: &CellValue) {
        for row in &mut self.rows {
            row[column] = value.clone();
        }
    }

    /// Keeps the rows whose flag in `keep` is set, preserving their order.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.rows.len());
        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .zip(keep.iter().copied())
            .filter_map(|(row, kept)| kept.then_some(row))
            .collect();
    }
}

/// Converts an Excel serial day number (1900 date system) into a date.
///
/// Serial 60 is the non-existent 1900-02-29 and has no date.
pub fn date_from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.trunc() as u64;
    match days {
        60 => None,
        1..=59 => excel_epoch()?.checked_add_days(chrono::Days::new(days + 1)),
        _ => excel_epoch()?.checked_add_days(chrono::Days::new(days)),
    }
}

/// Converts a date into the Excel serial day number used for date cells.
pub fn date_to_excel_serial(date: NaiveDate) -> Option<f64> {
    let days = date.signed_duration_since(excel_epoch()?).num_days();
    match days {
        ..=1 => None,
        2..=60 => Some((days - 1) as f64),
        _ => Some(days as f64),
    }
}

/// Day zero for serials from 61 (1900-03-01) onwards. Earlier serials are one
/// day off because Excel counts 1900 as a leap year.
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}
