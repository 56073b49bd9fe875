use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::skillset::census::clean::CleanContext;
use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::model::columns;
use crate::skillset::census::model::{CellValue, CensusTable, DATE_PATTERN, date_from_excel_serial};

const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%m/%d/%y", "%m-%d-%Y"];
const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses the date spellings found in census exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let dates = DATE_FORMATS
        .iter()
        .filter_map(|pattern| NaiveDate::parse_from_str(raw, pattern).ok());
    let date_times = DATE_TIME_FORMATS
        .iter()
        .filter_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|value| value.date());
    // `%Y` accepts two digit years, so `1/2/20` would otherwise land in year 20.
    dates.chain(date_times).find(|date| date.year() >= 1000)
}

/// Renders the three date columns as `MM/DD/YYYY` text.
///
/// The hire date is always rendered. The birth date and the status date
/// are only rendered when they are still real dates, so text such as the
/// birth date sentinel passes through as is.
pub(crate) fn format_dates(
    mut table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let hire_column = table.require_column(columns::HIRE_DATE)?;
    let birth_column = table.require_column(columns::BIRTH_DATE)?;
    let status_column = table.require_column(columns::LAST_STATUS_DATE)?;

    for row in 0..table.len() {
        let hire = match table.get(row, hire_column) {
            cell if cell.is_missing() => CellValue::Empty,
            CellValue::Date(date) => render(*date),
            CellValue::Number(serial) => date_from_excel_serial(*serial)
                .map(render)
                .ok_or_else(|| ToolError::format(columns::HIRE_DATE, row, serial))?,
            CellValue::Text(value) => parse_date(value)
                .map(render)
                .ok_or_else(|| ToolError::format(columns::HIRE_DATE, row, value))?,
            other => return Err(ToolError::format(columns::HIRE_DATE, row, other)),
        };
        table.set(row, hire_column, hire);

        match table.get(row, birth_column) {
            CellValue::Date(date) => {
                let rendered = render(*date);
                table.set(row, birth_column, rendered);
            }
            CellValue::Text(_) | CellValue::Empty => {}
            other => return Err(ToolError::format(columns::BIRTH_DATE, row, other)),
        }

        if let CellValue::Date(date) = table.get(row, status_column) {
            let rendered = render(*date);
            table.set(row, status_column, rendered);
        }
    }
    Ok(table)
}

fn render(date: NaiveDate) -> CellValue {
    CellValue::Text(date.format(DATE_PATTERN).to_string())
}
