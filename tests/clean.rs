mod common;

use census_cleaner::ToolError;
use census_cleaner::clean::{self, CleanContext, branch_code, division_code, parse_date};
use census_cleaner::filter::{self, FilterSummary};
use census_cleaner::layout::{CensusLayout, ColumnFormat};
use census_cleaner::model::{CellValue, CensusTable};
use census_cleaner::model::columns::PASSTHROUGH;
use census_cleaner::pipeline::clean_table;
use common::{CountingLookup, RAW_COLUMNS, cell, census, date, record, run_date, text};

#[test]
fn documented_scenario_row_is_cleaned() {
    let table = census(vec![record(&[
        ("SSN", text("123-45-6789")),
        ("Gender", CellValue::Empty),
        ("EmployeeBranch", text("Eagan")),
        ("HourlyRate", CellValue::Empty),
        ("Status", text("A")),
        ("LastStatusDate", text("01/01/2020")),
    ])]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cleaned.len(), 1);
    assert_eq!(cell(&cleaned, 0, "SSN"), &text("123456789"));
    assert_eq!(cell(&cleaned, 0, "Gender"), &text("F"));
    assert_eq!(cell(&cleaned, 0, "EmployeeBranchCode"), &text("B03"));
    assert_eq!(cell(&cleaned, 0, "DivisionCode"), &text("0001"));
    assert_eq!(cell(&cleaned, 0, "HourlyRate"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 0, "AnnualPay"), &CellValue::Number(2080.0));
    assert_eq!(cell(&cleaned, 0, "LastStatusDate"), &CellValue::Empty);
}

#[test]
fn missing_fields_receive_defaults() {
    let table = census(vec![record(&[
        ("MaritalStatusCode", CellValue::Empty),
        ("BirthDate", CellValue::Empty),
        ("LocationStateCode", text("  ")),
        ("Salaried", CellValue::Empty),
    ])]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "MaritalStatusCode"), &text("S"));
    assert_eq!(cell(&cleaned, 0, "BirthDate"), &text("01/01/1921"));
    assert_eq!(cell(&cleaned, 0, "LocationStateCode"), &text("CA"));
    assert_eq!(cell(&cleaned, 0, "Salaried"), &text("N"));
    assert_eq!(cell(&cleaned, 0, "CountryCode"), &text("US"));
    assert_eq!(cell(&cleaned, 0, "PayCycle"), &CellValue::Number(52.0));
    assert_eq!(cell(&cleaned, 0, "HourlyRate"), &CellValue::Number(25.5));
    assert_eq!(cell(&cleaned, 0, "AnnualPay"), &CellValue::Number(53040.0));
}

#[test]
fn cell_phone_becomes_home_phone() {
    let table = census(vec![record(&[])]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert!(cleaned.column_index("EmployeeCellPhone").is_none());
    assert_eq!(cell(&cleaned, 0, "HomePhone"), &text("651-555-0100"));
}

#[test]
fn status_dates_follow_employment_status() {
    let table = census(vec![
        record(&[
            ("Status", text("A")),
            ("LastStatusDate", CellValue::Date(date(2024, 1, 5))),
        ]),
        record(&[("Status", text("T")), ("LastStatusDate", CellValue::Empty)]),
        record(&[
            ("Status", text("T")),
            ("LastStatusDate", CellValue::Date(date(2024, 1, 5))),
        ]),
        record(&[("Status", text("L")), ("LastStatusDate", text(" "))]),
    ]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "LastStatusDate"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 1, "LastStatusDate"), &text("10/19/2026"));
    assert_eq!(cell(&cleaned, 2, "LastStatusDate"), &text("01/05/2024"));
    assert_eq!(cell(&cleaned, 3, "LastStatusDate"), &CellValue::Empty);
}

#[test]
fn numeric_ssn_keeps_leading_zero() {
    let table = census(vec![record(&[("SSN", CellValue::Number(12_345_678.0))])]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "SSN"), &text("012345678"));
}

#[test]
fn uninterpretable_ssn_is_a_format_error() {
    let table = census(vec![record(&[("SSN", CellValue::Bool(true))])]);
    let mut lookup = CountingLookup::default();

    let error = clean_table(table, &mut lookup, run_date()).expect_err("bool SSN rejected");

    assert!(matches!(error, ToolError::Format { ref column, row: 0, .. } if column == "SSN"));
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn missing_input_column_is_reported() {
    let mut table = census(vec![record(&[])]);
    table.remove_column("HourlyRate");
    let mut lookup = CountingLookup::default();

    let error = clean_table(table, &mut lookup, run_date()).expect_err("column required");

    assert!(matches!(error, ToolError::MissingColumn(ref name) if name == "HourlyRate"));
}

#[test]
fn branch_and_division_codes() {
    assert_eq!(branch_code("Santa Fe Springs, LLC."), Some("B13"));
    assert_eq!(branch_code("SkillSet Group LLC - Oasis"), Some("B15"));
    assert_eq!(branch_code("Unknown Branch"), None);

    assert_eq!(division_code("Santa Ana, LLC."), "0002");
    assert_eq!(division_code("Santa Ana, Inc."), "0001");
    assert_eq!(division_code("SkillSet Group Inc - Oasis"), "0001");
    assert_eq!(division_code("SkillSet Group LLC - Oasis"), "0002");
    assert_eq!(division_code("Eagan"), "0001");

    let table = census(vec![
        record(&[("EmployeeBranch", text("Paramount, LLC."))]),
        record(&[("EmployeeBranch", text("Nowhere Holdings"))]),
    ]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "EmployeeBranchCode"), &text("B07"));
    assert_eq!(cell(&cleaned, 0, "DivisionCode"), &text("0002"));
    assert_eq!(cell(&cleaned, 1, "EmployeeBranchCode"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 1, "DivisionCode"), &text("0001"));
}

#[test]
fn address_gaps_are_filled_from_zip_code() {
    let table = census(vec![
        record(&[
            ("City", CellValue::Empty),
            ("StateCode", text("Minnesota")),
            ("ZipCode", text("55121-4400")),
        ]),
        record(&[
            ("City", CellValue::Empty),
            ("StateCode", CellValue::Empty),
            ("ZipCode", CellValue::Number(55121.0)),
        ]),
        record(&[
            ("City", CellValue::Empty),
            ("StateCode", CellValue::Empty),
            ("ZipCode", text("99999")),
        ]),
        record(&[
            ("City", text("Boston")),
            ("StateCode", text("MA")),
            ("ZipCode", text("02134")),
        ]),
    ]);
    let mut lookup = CountingLookup::default().with_place("55121", "Eagan", "MN");

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "City"), &text("Eagan"));
    assert_eq!(cell(&cleaned, 0, "StateCode"), &text("MN"));
    assert_eq!(cell(&cleaned, 1, "City"), &text("Eagan"));
    assert_eq!(cell(&cleaned, 1, "StateCode"), &text("MN"));
    assert_eq!(cell(&cleaned, 2, "City"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 2, "StateCode"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 3, "City"), &text("Boston"));
    // One provider call per distinct zip code, however many fields need it.
    assert_eq!(lookup.calls, 2);
}

#[test]
fn hire_dates_are_rendered_as_text() {
    assert_eq!(parse_date("2015-03-02"), Some(date(2015, 3, 2)));
    assert_eq!(parse_date("3/2/2015"), Some(date(2015, 3, 2)));
    assert_eq!(parse_date("03/02/15"), Some(date(2015, 3, 2)));
    assert_eq!(parse_date("2015-03-02 00:00:00"), Some(date(2015, 3, 2)));
    assert_eq!(parse_date("next week"), None);

    let table = census(vec![
        record(&[("HireDate", text("2015-03-02"))]),
        record(&[("HireDate", CellValue::Number(42065.0))]),
        record(&[("HireDate", CellValue::Empty)]),
    ]);
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cell(&cleaned, 0, "HireDate"), &text("03/02/2015"));
    assert_eq!(cell(&cleaned, 1, "HireDate"), &text("03/02/2015"));
    assert_eq!(cell(&cleaned, 2, "HireDate"), &CellValue::Empty);
    assert_eq!(cell(&cleaned, 0, "BirthDate"), &text("05/17/1980"));
}

#[test]
fn unparseable_hire_date_is_a_format_error() {
    let table = census(vec![record(&[("HireDate", text("someday"))])]);
    let mut lookup = CountingLookup::default();

    let error = clean_table(table, &mut lookup, run_date()).expect_err("hire date rejected");

    assert!(matches!(error, ToolError::Format { ref column, .. } if column == "HireDate"));
}

/// Raw census with `MiddleName` between SSN and FirstName, as in the standard
/// template.
fn census_with_middle_name(middle: CellValue) -> CensusTable {
    let mut header: Vec<String> = RAW_COLUMNS.iter().map(|name| name.to_string()).collect();
    header.insert(1, "MiddleName".to_string());
    let mut table = CensusTable::new(header);
    let mut row = record(&[]);
    row.insert(1, middle);
    table.push_row(row);
    table
}

#[test]
fn passthrough_fields_are_blanked_in_place() {
    let table = census_with_middle_name(text("Q"));
    let mut lookup = CountingLookup::default();

    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(cleaned.column_index("MiddleName"), Some(1));
    assert_eq!(cleaned.columns()[2], "FirstName");
    assert_eq!(cell(&cleaned, 0, "MiddleName"), &CellValue::Empty);

    let appended: Vec<&str> = PASSTHROUGH
        .iter()
        .copied()
        .filter(|name| *name != "MiddleName")
        .collect();
    let header = cleaned.columns();
    let tail: Vec<&str> = header[header.len() - appended.len()..]
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(tail, appended);
    for name in PASSTHROUGH {
        assert_eq!(cell(&cleaned, 0, name), &CellValue::Empty);
    }
}

#[test]
fn disqualified_records_are_dropped_in_order() {
    let table = census(vec![
        record(&[("SSN", text("100-00-0001"))]),
        record(&[
            ("SSN", text("100-00-0002")),
            ("EmployeeBranch", text("Internal Payroll, Inc.")),
        ]),
        record(&[("SSN", CellValue::Empty)]),
        record(&[
            ("SSN", text("100-00-0004")),
            ("EmployeeBranch", text("Internal Payroll, LLC.")),
        ]),
        record(&[
            ("SSN", CellValue::Empty),
            ("EmployeeBranch", text("Internal Payroll, Inc.")),
        ]),
    ]);
    let mut lookup = CountingLookup::default();

    let (cleaned, summary) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    assert_eq!(
        summary,
        FilterSummary {
            internal_payroll: 2,
            missing_ssn: 1,
        }
    );
    assert_eq!(cleaned.len(), 2);
    assert_eq!(cell(&cleaned, 0, "SSN"), &text("100000001"));
    assert_eq!(cell(&cleaned, 1, "SSN"), &text("100000004"));
    assert_eq!(cell(&cleaned, 1, "EmployeeBranchCode"), &text("B05"));
}

#[test]
fn filter_works_on_uncleaned_tables() {
    let table = census(vec![record(&[]), record(&[("SSN", text(""))])]);

    let (kept, summary) = filter::drop_disqualified(table).expect("filter applied");

    assert_eq!(kept.len(), 1);
    assert_eq!(summary.total(), 1);
}

#[test]
fn cleaning_is_idempotent() {
    let table = census(vec![
        record(&[
            ("SSN", text("123-45-6789")),
            ("Gender", CellValue::Empty),
            ("HourlyRate", CellValue::Empty),
        ]),
        record(&[
            ("Status", text("T")),
            ("City", CellValue::Empty),
            ("ZipCode", text("55121")),
        ]),
        record(&[("BirthDate", CellValue::Empty), ("EmployeeBranch", text("Riverside, LLC."))]),
    ]);
    let mut lookup = CountingLookup::default().with_place("55121", "Eagan", "MN");

    let (once, _) = clean_table(table, &mut lookup, run_date()).expect("first pass");
    let (twice, summary) =
        clean_table(once.clone(), &mut lookup, run_date()).expect("second pass");

    assert_eq!(summary.total(), 0);
    assert_eq!(once, twice);
}

#[test]
fn steps_run_in_documented_order() {
    let names: Vec<&str> = clean::STEPS.iter().map(|step| step.name).collect();
    assert_eq!(
        names,
        vec![
            "ssn",
            "gender",
            "marital_status",
            "birth_date",
            "country_code",
            "phone",
            "last_status_date",
            "location_state",
            "pay_cycle",
            "salaried",
            "pay_rate",
            "branch_code",
            "division_code",
            "address",
            "passthrough",
            "dates",
        ]
    );
}

#[test]
fn birth_date_sentinel_survives_date_step() {
    let table = census(vec![record(&[("BirthDate", CellValue::Empty)])]);
    let mut lookup = CountingLookup::default();
    let mut ctx = CleanContext::new(run_date(), &mut lookup);

    let cleaned = clean::run_steps(table, &mut ctx).expect("steps applied");

    assert_eq!(cell(&cleaned, 0, "BirthDate"), &text("01/01/1921"));
}

#[test]
fn layout_assigns_formats_by_name() {
    let table = census(vec![record(&[])]);
    let mut lookup = CountingLookup::default();
    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    let formats = CensusLayout::standard().verify(&cleaned).expect("layout holds");

    for (name, format) in cleaned.columns().iter().zip(&formats) {
        let expected = match name.as_str() {
            "HireDate" | "BirthDate" | "LastStatusDate" => ColumnFormat::Date,
            _ => ColumnFormat::Text,
        };
        assert_eq!(*format, expected, "format of {name}");
    }
    assert_eq!(ColumnFormat::Date.num_format(), "m/d/yyyy;@");
    assert_eq!(ColumnFormat::Text.num_format(), "@");
}

#[test]
fn layout_rejects_raw_tables() {
    let table = census(vec![record(&[])]);

    let error = CensusLayout::standard().verify(&table).expect_err("raw table rejected");

    assert!(matches!(error, ToolError::Layout(_)));
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn layout_accepts_passthrough_fields_in_template_position() {
    let table = census_with_middle_name(CellValue::Empty);
    let mut lookup = CountingLookup::default();
    let (cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");

    let formats = CensusLayout::standard().verify(&cleaned).expect("layout holds");

    assert_eq!(formats.len(), cleaned.columns().len());
    assert_eq!(formats[1], ColumnFormat::Text);
}

#[test]
fn layout_rejects_missing_passthrough_field() {
    let table = census(vec![record(&[])]);
    let mut lookup = CountingLookup::default();
    let (mut cleaned, _) = clean_table(table, &mut lookup, run_date()).expect("census cleaned");
    cleaned.remove_column("Suffix");

    let error = CensusLayout::standard().verify(&cleaned).expect_err("Suffix required");

    assert!(matches!(error, ToolError::Layout(ref message) if message.contains("Suffix")));
}
