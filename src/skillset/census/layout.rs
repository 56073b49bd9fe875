use std::collections::HashSet;

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::model::CensusTable;
use crate::skillset::census::model::columns;

/// Cell format applied to an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// `m/d/yyyy` display format.
    Date,
    /// Text format, so numeric looking codes keep their leading zeros.
    Text,
}

impl ColumnFormat {
    pub fn for_column(name: &str) -> Self {
        if columns::DATE_COLUMNS.contains(&name) {
            ColumnFormat::Date
        } else {
            ColumnFormat::Text
        }
    }

    /// Excel number format string.
    pub fn num_format(self) -> &'static str {
        match self {
            ColumnFormat::Date => "m/d/yyyy;@",
            ColumnFormat::Text => "@",
        }
    }
}

/// Output contract of the census sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusLayout {
    required: Vec<&'static str>,
}

impl Default for CensusLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl CensusLayout {
    /// Layout produced by the cleaning steps: every cleaned column and every
    /// passthrough field, each exactly once. Column order is left as loaded.
    pub fn standard() -> Self {
        let mut required = vec![
            columns::SSN,
            columns::GENDER,
            columns::MARITAL_STATUS_CODE,
            columns::BIRTH_DATE,
            columns::HIRE_DATE,
            columns::COUNTRY_CODE,
            columns::STATUS,
            columns::LAST_STATUS_DATE,
            columns::LOCATION_STATE_CODE,
            columns::PAY_CYCLE,
            columns::SALARIED,
            columns::HOURLY_RATE,
            columns::ANNUAL_PAY,
            columns::EMPLOYEE_BRANCH,
            columns::EMPLOYEE_BRANCH_CODE,
            columns::DIVISION_CODE,
            columns::CITY,
            columns::STATE_CODE,
            columns::ZIP_CODE,
        ];
        required.extend(columns::PASSTHROUGH);
        Self { required }
    }

    /// Checks `table` against the layout and returns the format of each
    /// column, in column order.
    pub fn verify(&self, table: &CensusTable) -> Result<Vec<ColumnFormat>> {
        let header = table.columns();

        let mut seen = HashSet::new();
        for name in header {
            if !seen.insert(name.as_str()) {
                return Err(ToolError::Layout(format!("column '{name}' appears twice")));
            }
        }

        let missing: Vec<&str> = self
            .required
            .iter()
            .copied()
            .filter(|name| !seen.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(ToolError::Layout(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        Ok(header
            .iter()
            .map(|name| ColumnFormat::for_column(name))
            .collect())
    }
}
