use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::lookup::{ZipLookup, ZipPlace, ZipQuery, normalize_zip};

/// One row of a zip directory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipRecord {
    pub zipcode: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Zip code directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct ZipDirectory {
    places: HashMap<String, ZipPlace>,
}

impl ZipDirectory {
    /// A directory that knows no zip codes; every lookup fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a directory from records, skipping rows whose zip code cannot be
    /// normalized.
    pub fn from_records(records: impl IntoIterator<Item = ZipRecord>) -> Self {
        let places = records
            .into_iter()
            .filter_map(|record| {
                let zip = normalize_zip(&record.zipcode)?;
                let place = ZipPlace {
                    state: non_blank(record.state).map(|state| state.to_ascii_uppercase()),
                    city: non_blank(record.city),
                };
                Some((zip, place))
            })
            .collect();
        Self { places }
    }

    /// Loads a directory from a `.csv` file with a `zipcode,city,state` header,
    /// or from a JSON array of the same records.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let records: Vec<ZipRecord> = if is_csv {
            let mut reader = csv::Reader::from_path(path)?;
            reader.deserialize().collect::<std::result::Result<_, _>>()?
        } else {
            let source = fs::read_to_string(path)?;
            serde_json::from_str(&source)?
        };

        let directory = Self::from_records(records);
        if directory.is_empty() {
            return Err(ToolError::ZipDirectory(format!(
                "{} contains no usable zip codes",
                path.display()
            )));
        }
        info!(zip_codes = directory.len(), "zip directory loaded");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl ZipLookup for ZipDirectory {
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace> {
        let key = normalize_zip(zip).ok_or_else(|| ToolError::Lookup {
            zip: zip.to_string(),
            reason: "malformed zip code".into(),
        })?;
        self.places
            .get(&key)
            .map(|place| place.project(query))
            .ok_or_else(|| ToolError::Lookup {
                zip: zip.to_string(),
                reason: "unknown zip code".into(),
            })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
