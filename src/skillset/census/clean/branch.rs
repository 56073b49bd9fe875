use crate::skillset::census::clean::CleanContext;
use crate::skillset::census::error::Result;
use crate::skillset::census::model::columns;
use crate::skillset::census::model::{CellValue, CensusTable};

/// Branch whose employees are paid outside the census and never exported.
pub const INTERNAL_PAYROLL_BRANCH: &str = "Internal Payroll, Inc.";

/// Branch name → branch code.
pub const BRANCH_CODES: [(&str, &str); 15] = [
    ("Commerce, Inc.", "B01"),
    ("Commerce, LLC.", "B02"),
    ("Eagan", "B03"),
    (INTERNAL_PAYROLL_BRANCH, "B04"),
    ("Internal Payroll, LLC.", "B05"),
    ("Paramount, Inc.", "B06"),
    ("Paramount, LLC.", "B07"),
    ("Riverside, Inc.", "B08"),
    ("Riverside, LLC.", "B09"),
    ("Santa Ana, Inc.", "B10"),
    ("Santa Ana, LLC.", "B11"),
    ("Santa Fe Springs, Inc.", "B12"),
    ("Santa Fe Springs, LLC.", "B13"),
    ("SkillSet Group Inc - Oasis", "B14"),
    ("SkillSet Group LLC - Oasis", "B15"),
];

const INC_DIVISION: &str = "0001";
const LLC_DIVISION: &str = "0002";

/// Returns the code of a known branch.
pub fn branch_code(branch: &str) -> Option<&'static str> {
    BRANCH_CODES
        .iter()
        .find(|(name, _)| *name == branch)
        .map(|(_, code)| *code)
}

/// Incorporated branches, and branches that name neither form, belong to
/// division `0001`. LLC branches belong to `0002`.
pub fn division_code(branch: &str) -> &'static str {
    if branch.contains("Inc") {
        INC_DIVISION
    } else if branch.contains("LLC") {
        LLC_DIVISION
    } else {
        INC_DIVISION
    }
}

pub(crate) fn clean_branch_code(
    mut table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let branch_column = table.require_column(columns::EMPLOYEE_BRANCH)?;
    let code_column = table.ensure_column(columns::EMPLOYEE_BRANCH_CODE);

    for row in 0..table.len() {
        let code = branch_text(table.get(row, branch_column))
            .and_then(branch_code)
            .map(CellValue::text)
            .unwrap_or(CellValue::Empty);
        table.set(row, code_column, code);
    }
    Ok(table)
}

pub(crate) fn clean_division_code(
    mut table: CensusTable,
    _ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let branch_column = table.require_column(columns::EMPLOYEE_BRANCH)?;
    let division_column = table.ensure_column(columns::DIVISION_CODE);

    for row in 0..table.len() {
        let branch = branch_text(table.get(row, branch_column)).unwrap_or_default();
        let division = division_code(branch);
        table.set(row, division_column, CellValue::text(division));
    }
    Ok(table)
}

fn branch_text(cell: &CellValue) -> Option<&str> {
    cell.as_text().map(str::trim).filter(|name| !name.is_empty())
}
