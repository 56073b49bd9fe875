use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use crate::skillset::census::clean::{self, CleanContext};
use crate::skillset::census::config::CleanConfig;
use crate::skillset::census::error::Result;
use crate::skillset::census::filter::{self, FilterSummary};
use crate::skillset::census::io::excel_read;
use crate::skillset::census::io::excel_write;
use crate::skillset::census::layout::CensusLayout;
use crate::skillset::census::lookup::{CachedZipLookup, ZipDirectory, ZipLookup};
use crate::skillset::census::model::CensusTable;

/// Outcome of a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub filtered: FilterSummary,
}

/// Runs the cleaning pipeline as configured, stamping terminations with
/// today's date.
pub fn run(config: &CleanConfig) -> Result<CleanSummary> {
    let mut directory = match &config.zip_directory {
        Some(path) => ZipDirectory::load(path)?,
        None => {
            warn!("no zip directory configured, missing cities and states stay blank");
            ZipDirectory::empty()
        }
    };
    let run_date = Local::now().date_naive();
    clean_census(&config.input, &config.output, &mut directory, run_date)
}

/// Loads the census at `input`, cleans it, and writes the result to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), %run_date)
)]
pub fn clean_census(
    input: &Path,
    output: &Path,
    lookup: &mut dyn ZipLookup,
    run_date: NaiveDate,
) -> Result<CleanSummary> {
    let table = excel_read::read_census(input)?;
    let rows_read = table.len();
    info!(rows = rows_read, columns = table.columns().len(), "read census");

    let (table, filtered) = clean_table(table, lookup, run_date)?;

    excel_write::write_census(output, &table, &CensusLayout::standard())?;
    info!(rows = table.len(), "wrote cleaned census");

    Ok(CleanSummary {
        rows_read,
        rows_written: table.len(),
        filtered,
    })
}

/// Applies the cleaning steps and the record filter to an in-memory table.
/// Zip lookups are cached for the duration of the call.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn clean_table(
    table: CensusTable,
    lookup: &mut dyn ZipLookup,
    run_date: NaiveDate,
) -> Result<(CensusTable, FilterSummary)> {
    let mut cached = CachedZipLookup::new(lookup);
    let table = {
        let mut ctx = CleanContext::new(run_date, &mut cached);
        clean::run_steps(table, &mut ctx)?
    };
    info!(
        lookups = cached.misses(),
        cache_hits = cached.hits(),
        "address lookups resolved"
    );

    filter::drop_disqualified(table)
}
