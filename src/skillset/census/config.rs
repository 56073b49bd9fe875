use std::path::PathBuf;

/// File written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "clean_census.xlsx";

/// Settings for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    /// Spreadsheet to clean.
    pub input: PathBuf,
    /// Destination of the cleaned census.
    pub output: PathBuf,
    /// Zip directory used to fill in missing cities and states. Without one,
    /// those fields stay blank.
    pub zip_directory: Option<PathBuf>,
}

impl CleanConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            zip_directory: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_zip_directory(mut self, zip_directory: Option<PathBuf>) -> Self {
        self.zip_directory = zip_directory;
        self
    }
}
