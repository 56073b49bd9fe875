//! Core library for the census-cleaner command line application.
//!
//! The library turns a raw employee census spreadsheet into the fixed census
//! layout expected by the benefits system. The modules keep responsibilities
//! narrow and composable:
//! - spreadsheet IO lives under [`skillset::census::io`],
//! - the in-memory table under [`skillset::census::model`],
//! - the ordered field normalizers under [`skillset::census::clean`],
//! - record filtering under [`skillset::census::filter`],
//! - zip code resolution under [`skillset::census::lookup`],
//! - the end-to-end orchestration under [`skillset::census::pipeline`].

pub mod skillset;

pub use skillset::census::{
    Result, ToolError, clean, config, error, filter, io, layout, lookup, model, pipeline,
};
