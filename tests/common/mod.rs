#![allow(dead_code)]

use std::collections::HashMap;

use census_cleaner::lookup::{ZipLookup, ZipPlace, ZipQuery};
use census_cleaner::model::{CellValue, CensusTable};
use census_cleaner::{Result, ToolError};
use chrono::NaiveDate;

/// Header of a typical raw census export.
pub const RAW_COLUMNS: [&str; 23] = [
    "SSN",
    "FirstName",
    "LastName",
    "Gender",
    "MaritalStatusCode",
    "BirthDate",
    "HireDate",
    "Address1",
    "City",
    "StateCode",
    "ZipCode",
    "CountryCode",
    "EmployeeCellPhone",
    "Status",
    "LastStatusDate",
    "LocationStateCode",
    "PayCycle",
    "Salaried",
    "HourlyRate",
    "AnnualPay",
    "EmployeeBranch",
    "EmployeeBranchCode",
    "DivisionCode",
];

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn text(value: &str) -> CellValue {
    CellValue::text(value)
}

fn default_cell(column: &str) -> CellValue {
    match column {
        "SSN" => text("111-22-3333"),
        "FirstName" => text("Ada"),
        "LastName" => text("Lovelace"),
        "Gender" => text("M"),
        "MaritalStatusCode" => text("M"),
        "BirthDate" => CellValue::Date(date(1980, 5, 17)),
        "HireDate" => CellValue::Date(date(2015, 3, 2)),
        "Address1" => text("1 Main St"),
        "City" => text("Eagan"),
        "StateCode" => text("MN"),
        "ZipCode" => text("55121"),
        "EmployeeCellPhone" => text("651-555-0100"),
        "Status" => text("A"),
        "LocationStateCode" => text("MN"),
        "PayCycle" => CellValue::Number(26.0),
        "Salaried" => text("Y"),
        "HourlyRate" => CellValue::Number(25.5),
        "AnnualPay" => CellValue::Number(53040.0),
        "EmployeeBranch" => text("Eagan"),
        _ => CellValue::Empty,
    }
}

/// Builds a raw record, replacing the default cells named in `overrides`.
pub fn record(overrides: &[(&str, CellValue)]) -> Vec<CellValue> {
    RAW_COLUMNS
        .iter()
        .map(|column| {
            overrides
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| default_cell(column))
        })
        .collect()
}

pub fn census(records: Vec<Vec<CellValue>>) -> CensusTable {
    let mut table = CensusTable::new(RAW_COLUMNS.iter().map(|name| name.to_string()).collect());
    for row in records {
        table.push_row(row);
    }
    table
}

pub fn cell<'a>(table: &'a CensusTable, row: usize, column: &str) -> &'a CellValue {
    table
        .value(row, column)
        .unwrap_or_else(|| panic!("column {column} missing"))
}

/// In-memory lookup that counts how often it is asked.
#[derive(Debug, Default)]
pub struct CountingLookup {
    pub places: HashMap<String, ZipPlace>,
    pub calls: usize,
}

impl CountingLookup {
    pub fn with_place(mut self, zip: &str, city: &str, state: &str) -> Self {
        self.places.insert(
            zip.to_string(),
            ZipPlace {
                state: Some(state.to_string()),
                city: Some(city.to_string()),
            },
        );
        self
    }
}

impl ZipLookup for CountingLookup {
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace> {
        self.calls += 1;
        self.places
            .get(zip)
            .map(|place| place.project(query))
            .ok_or_else(|| ToolError::Lookup {
                zip: zip.to_string(),
                reason: "unknown zip code".into(),
            })
    }
}
