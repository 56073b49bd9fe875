use tracing::{trace, warn};

use crate::skillset::census::clean::CleanContext;
use crate::skillset::census::error::Result;
use crate::skillset::census::lookup::{ZipPlace, ZipQuery, zip_from_cell};
use crate::skillset::census::model::columns;
use crate::skillset::census::model::{CellValue, CensusTable};

/// Two-letter codes accepted in the StateCode column without a lookup.
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

pub fn is_state_code(value: &str) -> bool {
    STATE_CODES.contains(&value)
}

/// Fills missing cities and missing or unrecognized state codes from the zip
/// code. Anything the lookup cannot resolve is left blank.
pub(crate) fn clean_address(
    mut table: CensusTable,
    ctx: &mut CleanContext<'_>,
) -> Result<CensusTable> {
    let city_column = table.require_column(columns::CITY)?;
    let state_column = table.require_column(columns::STATE_CODE)?;
    let zip_column = table.require_column(columns::ZIP_CODE)?;

    for row in 0..table.len() {
        let zip = zip_from_cell(table.get(row, zip_column));

        if table.get(row, city_column).is_missing() {
            let city =
                resolve(ctx, row, zip.as_deref(), ZipQuery::CITY).and_then(|place| place.city);
            table.set(row, city_column, city.map(CellValue::Text).unwrap_or_default());
        }

        let state_is_valid = table
            .get(row, state_column)
            .as_text()
            .is_some_and(is_state_code);
        if !state_is_valid {
            let state =
                resolve(ctx, row, zip.as_deref(), ZipQuery::STATE).and_then(|place| place.state);
            table.set(row, state_column, state.map(CellValue::Text).unwrap_or_default());
        }
    }
    Ok(table)
}

fn resolve(
    ctx: &mut CleanContext<'_>,
    row: usize,
    zip: Option<&str>,
    query: ZipQuery,
) -> Option<ZipPlace> {
    let Some(zip) = zip else {
        trace!(row, "no usable zip code, address field left blank");
        return None;
    };
    match ctx.lookup.lookup(zip, query) {
        Ok(place) => Some(place),
        Err(error) => {
            warn!(row, %error, "zip lookup failed, address field left blank");
            None
        }
    }
}
