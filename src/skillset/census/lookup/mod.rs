//! Zip code resolution used to fill in missing city and state fields.
//!
//! The cleaning pipeline only depends on the [`ZipLookup`] trait, so the
//! provider can be swapped out. [`CachedZipLookup`] wraps any provider and
//! makes sure each distinct zip code reaches it at most once per run.

mod directory;

use std::collections::HashMap;

use tracing::debug;

use crate::skillset::census::error::{Result, ToolError};
use crate::skillset::census::model::CellValue;

pub use directory::{ZipDirectory, ZipRecord};

/// Selects which parts of a place a lookup should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipQuery {
    pub state: bool,
    pub city: bool,
}

impl ZipQuery {
    pub const STATE: ZipQuery = ZipQuery {
        state: true,
        city: false,
    };
    pub const CITY: ZipQuery = ZipQuery {
        state: false,
        city: true,
    };
    pub const BOTH: ZipQuery = ZipQuery {
        state: true,
        city: true,
    };
}

/// City and state resolved for a zip code. Fields not requested by the query,
/// or unknown to the provider, are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipPlace {
    pub state: Option<String>,
    pub city: Option<String>,
}

impl ZipPlace {
    /// Keeps only the fields selected by `query`.
    pub fn project(&self, query: ZipQuery) -> ZipPlace {
        ZipPlace {
            state: self.state.clone().filter(|_| query.state),
            city: self.city.clone().filter(|_| query.city),
        }
    }
}

/// Resolves zip codes into places.
pub trait ZipLookup {
    /// Looks up `zip`, returning [`ToolError::Lookup`] when the zip code is
    /// unknown or malformed.
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace>;
}

impl<L: ZipLookup + ?Sized> ZipLookup for &mut L {
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace> {
        (**self).lookup(zip, query)
    }
}

impl<L: ZipLookup + ?Sized> ZipLookup for Box<L> {
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace> {
        (**self).lookup(zip, query)
    }
}

/// Memoizing wrapper that queries the inner provider once per distinct zip
/// code. Failed lookups are remembered too.
#[derive(Debug)]
pub struct CachedZipLookup<L> {
    inner: L,
    cache: HashMap<String, std::result::Result<ZipPlace, String>>,
    hits: usize,
    misses: usize,
}

impl<L: ZipLookup> CachedZipLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of lookups forwarded to the inner provider.
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: ZipLookup> ZipLookup for CachedZipLookup<L> {
    fn lookup(&mut self, zip: &str, query: ZipQuery) -> Result<ZipPlace> {
        let cached = match self.cache.get(zip) {
            Some(entry) => {
                self.hits += 1;
                entry.clone()
            }
            None => {
                self.misses += 1;
                let entry = self
                    .inner
                    .lookup(zip, ZipQuery::BOTH)
                    .map_err(|err| match err {
                        ToolError::Lookup { reason, .. } => reason,
                        other => other.to_string(),
                    });
                debug!(zip, found = entry.is_ok(), "zip lookup cached");
                self.cache.insert(zip.to_string(), entry.clone());
                entry
            }
        };

        cached
            .map(|place| place.project(query))
            .map_err(|reason| ToolError::Lookup {
                zip: zip.to_string(),
                reason,
            })
    }
}

/// Normalizes a zip code to its five digit form.
///
/// Accepts `90210`, `90210-1234`, ` 02134 ` and numeric cells such as
/// `2134.0`, which lost their leading zero in the spreadsheet.
pub fn normalize_zip(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let head = trimmed.split('-').next().unwrap_or(trimmed);
    let digits = head.strip_suffix(".0").unwrap_or(head);
    if digits.is_empty() || digits.len() > 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{digits:0>5}"))
}

/// Extracts a lookup key from a zip code cell.
pub fn zip_from_cell(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(value) => normalize_zip(value),
        CellValue::Number(value) if value.fract() == 0.0 && *value >= 0.0 => {
            normalize_zip(&format!("{}", *value as u64))
        }
        _ => None,
    }
}
