use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, instrument};

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::layout::{CensusLayout, ColumnFormat};
use crate::skillset::census::model::{CellValue, CensusTable, date_to_excel_serial};

/// Name of the single sheet in the output workbook.
pub const CENSUS_SHEET: &str = "Sheet1";

/// Writes the cleaned census to `path`.
///
/// The layout is verified first, and the workbook is assembled in memory
/// and saved once, so a failure leaves no output file behind.
#[instrument(level = "debug", skip_all, fields(output = %path.display(), rows = table.len()))]
pub fn write_census(path: &Path, table: &CensusTable, layout: &CensusLayout) -> Result<()> {
    let formats = layout.verify(table)?;

    let date_format = Format::new().set_num_format(ColumnFormat::Date.num_format());
    let text_format = Format::new().set_num_format(ColumnFormat::Text.num_format());
    let format_of = |kind: ColumnFormat| match kind {
        ColumnFormat::Date => &date_format,
        ColumnFormat::Text => &text_format,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(CENSUS_SHEET)?;

    for (col_idx, (header, kind)) in table.columns().iter().zip(&formats).enumerate() {
        let col = column_number(col_idx)?;
        worksheet.set_column_format(col, format_of(*kind))?;
        worksheet.write_string(0, col, header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, (cell, kind)) in row.iter().zip(&formats).enumerate() {
            let col = column_number(col_idx)?;
            let format = format_of(*kind);
            match cell {
                CellValue::Empty => {}
                CellValue::Text(value) => {
                    worksheet.write_string_with_format(excel_row, col, value, format)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number_with_format(excel_row, col, *value, format)?;
                }
                CellValue::Bool(value) => {
                    worksheet.write_boolean_with_format(excel_row, col, *value, format)?;
                }
                CellValue::Date(date) => match date_to_excel_serial(*date) {
                    Some(serial) => {
                        worksheet.write_number_with_format(excel_row, col, serial, &date_format)?;
                    }
                    None => {
                        worksheet.write_string_with_format(
                            excel_row,
                            col,
                            cell.to_string(),
                            format,
                        )?;
                    }
                },
            }
        }
    }

    workbook.save(path)?;
    debug!(columns = formats.len(), "census workbook saved");
    Ok(())
}

fn column_number(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| ToolError::Layout(format!("column index {index} exceeds the sheet width")))
}
