pub mod clean;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod layout;
pub mod lookup;
pub mod model;
pub mod pipeline;

pub use error::{Result, ToolError};
