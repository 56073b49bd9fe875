use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use census_cleaner::config::{CleanConfig, DEFAULT_OUTPUT};
use census_cleaner::pipeline;
use census_cleaner::{Result, ToolError};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = match cli.input {
        Some(path) => path,
        None => prompt_for_input()?,
    };

    let config = CleanConfig::new(input)
        .with_output(cli.output)
        .with_zip_directory(cli.zip_directory);

    let summary = pipeline::run(&config)?;
    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        dropped = summary.filtered.total(),
        "census cleaned"
    );
    Ok(())
}

fn prompt_for_input() -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "File to Clean: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let path = line.trim();
    if path.is_empty() {
        return Err(ToolError::Load("no input file given".into()));
    }
    Ok(PathBuf::from(path))
}

fn init_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| ToolError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Normalise an employee census spreadsheet into the standard census layout."
)]
struct Cli {
    /// Spreadsheet to clean. Prompted for when omitted.
    input: Option<PathBuf>,

    /// Where to write the cleaned census.
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// CSV or JSON zip directory (zipcode, city, state) used to fill in
    /// missing cities and states.
    #[arg(long)]
    zip_directory: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}
