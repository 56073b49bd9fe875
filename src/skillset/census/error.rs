use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads, cleans, or writes a census.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures outside the workbook libraries, such as reading
    /// the zip directory or the interactive prompt.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a JSON zip directory cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a CSV zip directory cannot be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when the input sheet is readable but not a usable table.
    #[error("cannot load census: {0}")]
    Load(String),

    /// Raised when a cleaning step reads a column the input does not carry.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// Raised when a field holds a value the cleaning rules cannot interpret.
    #[error("malformed value '{value}' in column {column} at row {row}")]
    Format {
        column: String,
        row: usize,
        value: String,
    },

    /// Raised when the zip lookup cannot resolve a zip code.
    #[error("zip lookup failed for '{zip}': {reason}")]
    Lookup { zip: String, reason: String },

    /// Raised when a zip directory file is structurally invalid.
    #[error("invalid zip directory: {0}")]
    ZipDirectory(String),

    /// Raised when the cleaned table does not match the census output layout.
    #[error("census layout mismatch: {0}")]
    Layout(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    /// Process exit code for this failure: `2` when the output could not be
    /// produced, `1` for everything that goes wrong before that.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::ExcelWrite(_) | ToolError::Layout(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn format(column: &str, row: usize, value: impl ToString) -> Self {
        ToolError::Format {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }
    }
}
