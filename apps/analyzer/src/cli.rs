use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_REPORT_PATH: &str = "reporte_quejas_dispositivos.json";
pub const DEFAULT_MAX_ROWS: usize = 50;

#[derive(Debug, Parser)]
#[command(
    name = "analyzer",
    version,
    about = "Device complaint analysis over customer-service spreadsheets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify conversations and write the complaint report
    Analyze(AnalyzeArgs),
    /// Print the structure of spreadsheets without calling the service
    Explore(ExploreArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Spreadsheets to analyze, in order
    #[arg(default_values = ["Casos 2022.xlsx", "Casos 2023.xlsx"])]
    pub files: Vec<PathBuf>,

    /// Rows analyzed per file; 0 analyzes every row
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    /// Where to write the JSON report
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub output: PathBuf,

    /// Only print the summary; do not write a report file
    #[arg(long, conflicts_with = "output")]
    pub no_output: bool,

    /// Pause after each classified row, overriding REQUEST_DELAY_MS
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl AnalyzeArgs {
    pub fn row_limit(&self) -> Option<usize> {
        (self.max_rows > 0).then_some(self.max_rows)
    }

    pub fn output_path(&self) -> Option<&std::path::Path> {
        (!self.no_output).then_some(self.output.as_path())
    }
}

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Spreadsheets to inspect
    #[arg(default_values = ["Casos 2022.xlsx", "Casos 2023.xlsx"])]
    pub files: Vec<PathBuf>,
}
