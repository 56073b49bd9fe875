use tracing::{info, instrument};

use crate::skillset::census::clean::INTERNAL_PAYROLL_BRANCH;
use crate::skillset::census::error::Result;
use crate::skillset::census::model::columns;
use crate::skillset::census::model::{CellValue, CensusTable};

/// Number of records removed by [`drop_disqualified`], per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub internal_payroll: usize,
    pub missing_ssn: usize,
}

impl FilterSummary {
    pub fn total(&self) -> usize {
        self.internal_payroll + self.missing_ssn
    }
}

/// Drops internal payroll records, then records without an SSN. The
/// surviving records keep their relative order.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn drop_disqualified(mut table: CensusTable) -> Result<(CensusTable, FilterSummary)> {
    let branch_column = table.require_column(columns::EMPLOYEE_BRANCH)?;
    let ssn_column = table.require_column(columns::SSN)?;

    let internal_payroll = retain_where(&mut table, |row| {
        !is_internal_payroll(&row[branch_column])
    });
    let missing_ssn = retain_where(&mut table, |row| !row[ssn_column].is_missing());

    let summary = FilterSummary {
        internal_payroll,
        missing_ssn,
    };
    info!(
        internal_payroll = summary.internal_payroll,
        missing_ssn = summary.missing_ssn,
        remaining = table.len(),
        "disqualified records dropped"
    );
    Ok((table, summary))
}

fn is_internal_payroll(cell: &CellValue) -> bool {
    cell.as_text()
        .is_some_and(|branch| branch.trim() == INTERNAL_PAYROLL_BRANCH)
}

fn retain_where(table: &mut CensusTable, keep: impl Fn(&[CellValue]) -> bool) -> usize {
    let flags: Vec<bool> = table.rows().iter().map(|row| keep(row.as_slice())).collect();
    let dropped = flags.iter().filter(|kept| !**kept).count();
    table.retain_rows(&flags);
    dropped
}
