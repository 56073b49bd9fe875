//! Field normalizers applied to a loaded census.
//!
//! The steps in [`STEPS`] run in a fixed order. Each one takes the table by
//! value and hands back the updated table. Some later steps read values that
//! earlier steps filled in. For example, the division code is derived from
//! the branch, and the date step leaves the birth date sentinel alone
//! because the sentinel is text.

mod address;
mod branch;
mod dates;

use chrono::NaiveDate;
use tracing::{debug, debug_span};

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::lookup::ZipLookup;
use crate::skillset::census::model::columns;
use crate::skillset::census::model::{CellValue, CensusTable, DATE_PATTERN};

pub use address::{STATE_CODES, is_state_code};
pub use branch::{BRANCH_CODES, INTERNAL_PAYROLL_BRANCH, branch_code, division_code};
pub use dates::parse_date;

/// Birth date written for employees whose birth date is unknown.
pub const BIRTH_DATE_SENTINEL: &str = "01/01/1921";
/// Annual pay assigned to records without an hourly rate.
pub const DEFAULT_ANNUAL_PAY: f64 = 2080.00;
/// Pay periods per year; every employee is paid weekly.
pub const PAY_CYCLE_WEEKLY: f64 = 52.0;

/// State shared by the cleaning steps of one run.
pub struct CleanContext<'a> {
    /// Date stamped on terminated records that carry no status date.
    pub run_date: NaiveDate,
    pub lookup: &'a mut dyn ZipLookup,
}

impl<'a> CleanContext<'a> {
    pub fn new(run_date: NaiveDate, lookup: &'a mut dyn ZipLookup) -> Self {
        Self { run_date, lookup }
    }
}

/// A named cleaning step.
pub struct CleanStep {
    pub name: &'static str,
    pub apply: fn(CensusTable, &mut CleanContext<'_>) -> Result<CensusTable>,
}

/// Cleaning steps in the order they must run.
pub const STEPS: &[CleanStep] = &[
    CleanStep {
        name: "ssn",
        apply: clean_ssn,
    },
    CleanStep {
        name: "gender",
        apply: clean_gender,
    },
    CleanStep {
        name: "marital_status",
        apply: clean_marital_status,
    },
    CleanStep {
        name: "birth_date",
        apply: clean_birth_date,
    },
    CleanStep {
        name: "country_code",
        apply: clean_country_code,
    },
    CleanStep {
        name: "phone",
        apply: rename_phone,
    },
    CleanStep {
        name: "last_status_date",
        apply: clean_last_status_date,
    },
    CleanStep {
        name: "location_state",
        apply: clean_location_state,
    },
    CleanStep {
        name: "pay_cycle",
        apply: clean_pay_cycle,
    },
    CleanStep {
        name: "salaried",
        apply: clean_salaried,
    },
    CleanStep {
        name: "pay_rate",
        apply: clean_pay_rate,
    },
    CleanStep {
        name: "branch_code",
        apply: branch::clean_branch_code,
    },
    CleanStep {
        name: "division_code",
        apply: branch::clean_division_code,
    },
    CleanStep {
        name: "address",
        apply: address::clean_address,
    },
    CleanStep {
        name: "passthrough",
        apply: add_passthrough_fields,
    },
    CleanStep {
        name: "dates",
        apply: dates::format_dates,
    },
];

/// Runs every cleaning step over `table`, stopping at the first failure.
pub fn run_steps(mut table: CensusTable, ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    for step in STEPS {
        let _span = debug_span!("clean_step", step = step.name).entered();
        table = (step.apply)(table, ctx)?;
        debug!(rows = table.len(), "step applied");
    }
    Ok(table)
}

/// Strips hyphens from every SSN. Numeric SSNs are rendered as nine digits so
/// that leading zeros survive. Missing SSNs are left for the record filter.
pub fn clean_ssn(mut table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    let column = table.require_column(columns::SSN)?;
    for row in 0..table.len() {
        let cleaned = match table.get(row, column) {
            cell if cell.is_missing() => CellValue::Empty,
            CellValue::Text(value) => CellValue::Text(value.trim().replace('-', "")),
            CellValue::Number(value) if value.fract() == 0.0 && *value >= 0.0 => {
                CellValue::Text(format!("{:09}", *value as u64))
            }
            other => return Err(ToolError::format(columns::SSN, row, other)),
        };
        table.set(row, column, cleaned);
    }
    Ok(table)
}

pub fn clean_gender(table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    default_missing(table, columns::GENDER, CellValue::text("F"))
}

pub fn clean_marital_status(
    table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    default_missing(table, columns::MARITAL_STATUS_CODE, CellValue::text("S"))
}

pub fn clean_birth_date(table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    default_missing(
        table,
        columns::BIRTH_DATE,
        CellValue::text(BIRTH_DATE_SENTINEL),
    )
}

pub fn clean_country_code(
    mut table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let column = table.ensure_column(columns::COUNTRY_CODE);
    table.fill_all(column, &CellValue::text("US"));
    Ok(table)
}

/// Renames the cell phone column to the census home phone column. An existing
/// home phone column is replaced by the cell phone numbers.
pub fn rename_phone(mut table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    if table.column_index(columns::EMPLOYEE_CELL_PHONE).is_some() {
        table.remove_column(columns::HOME_PHONE);
        table.rename_column(columns::EMPLOYEE_CELL_PHONE, columns::HOME_PHONE);
    }
    Ok(table)
}

/// Active employees carry no status date. Terminated employees without one
/// are stamped with the run date.
pub fn clean_last_status_date(
    mut table: CensusTable,
    ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let status_column = table.require_column(columns::STATUS)?;
    let date_column = table.require_column(columns::LAST_STATUS_DATE)?;
    let today = CellValue::Text(ctx.run_date.format(DATE_PATTERN).to_string());

    for row in 0..table.len() {
        let status = EmploymentStatus::from_cell(table.get(row, status_column));
        let has_date = !table.get(row, date_column).is_missing();

        match (status, has_date) {
            (EmploymentStatus::Active, true) => table.set(row, date_column, CellValue::Empty),
            (EmploymentStatus::Terminated, false) => table.set(row, date_column, today.clone()),
            (_, false) => table.set(row, date_column, CellValue::Empty),
            (_, true) => {}
        }
    }
    Ok(table)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmploymentStatus {
    Active,
    Terminated,
    Other,
}

impl EmploymentStatus {
    fn from_cell(cell: &CellValue) -> Self {
        match cell.as_text().map(str::trim) {
            Some("A") => EmploymentStatus::Active,
            Some("T") => EmploymentStatus::Terminated,
            _ => EmploymentStatus::Other,
        }
    }
}

pub fn clean_location_state(
    table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    default_missing(table, columns::LOCATION_STATE_CODE, CellValue::text("CA"))
}

pub fn clean_pay_cycle(mut table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    let column = table.ensure_column(columns::PAY_CYCLE);
    table.fill_all(column, &CellValue::Number(PAY_CYCLE_WEEKLY));
    Ok(table)
}

pub fn clean_salaried(table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    default_missing(table, columns::SALARIED, CellValue::text("N"))
}

/// Records without an hourly rate keep a blank rate and get the default
/// annual pay. Records with a rate are not touched.
pub fn clean_pay_rate(mut table: CensusTable, _ctx: &mut CleanContext<'_>) -> Result<CensusTable> {
    let rate_column = table.require_column(columns::HOURLY_RATE)?;
    let pay_column = table.require_column(columns::ANNUAL_PAY)?;

    for row in 0..table.len() {
        if table.get(row, rate_column).is_missing() {
            table.set(row, rate_column, CellValue::Empty);
            table.set(row, pay_column, CellValue::Number(DEFAULT_ANNUAL_PAY));
        }
    }
    Ok(table)
}

/// Blanks the passthrough fields. Columns the input already carries keep
/// their position; missing ones are appended in fixed order.
pub fn add_passthrough_fields(
    mut table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    for name in columns::PASSTHROUGH {
        match table.column_index(name) {
            Some(index) => table.fill_all(index, &CellValue::Empty),
            None => {
                table.ensure_column(name);
            }
        }
    }
    Ok(table)
}

fn default_missing(mut table: CensusTable, column: &str, value: CellValue) -> Result<CensusTable> {
    let index = table.require_column(column)?;
    table.fill_missing(index, &value);
    Ok(table)
}
