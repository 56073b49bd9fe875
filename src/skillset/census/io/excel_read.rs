use std::collections::HashSet;
use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::{debug, instrument};

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::model::{CellValue, CensusTable, date_from_excel_serial};

/// Reads the first worksheet of the workbook at `path` into a census table,
/// keeping the header names and the original row order.
#[instrument(level = "debug", skip_all, fields(input = %path.display()))]
pub fn read_census(path: &Path) -> Result<CensusTable> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::Load("workbook contains no worksheets".into()))?
        .map_err(ToolError::from)?;

    let table = range_to_table(&range)?;
    debug!(
        columns = table.columns().len(),
        rows = table.len(),
        "worksheet loaded"
    );
    Ok(table)
}

fn range_to_table(range: &Range<DataType>) -> Result<CensusTable> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ToolError::Load("worksheet is empty".into()))?;

    let columns = parse_header(header)?;
    let mut table = CensusTable::new(columns);

    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_to_value).collect();
        if cells.iter().all(CellValue::is_missing) {
            continue;
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn parse_header(header: &[DataType]) -> Result<Vec<String>> {
    let mut columns: Vec<String> = header
        .iter()
        .map(|cell| cell_to_string(Some(cell)).trim().to_string())
        .collect();

    // Trailing blank header cells are formatting leftovers, not columns.
    while columns.last().is_some_and(|name| name.is_empty()) {
        columns.pop();
    }

    if columns.is_empty() {
        return Err(ToolError::Load("header row is empty".into()));
    }

    let mut seen = HashSet::new();
    for (index, name) in columns.iter().enumerate() {
        if name.is_empty() {
            return Err(ToolError::Load(format!(
                "header cell {} is blank",
                index + 1
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(ToolError::Load(format!("duplicate column '{name}'")));
        }
    }

    Ok(columns)
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) if value.trim().is_empty() => CellValue::Empty,
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::DateTime(serial) => date_from_excel_serial(*serial)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Number(*serial)),
        other => CellValue::Text(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
