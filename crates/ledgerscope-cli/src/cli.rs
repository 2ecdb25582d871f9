//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ledgerscope::QuantileMethod;

/// Ledgerscope: journal-entry profiling and Benford's Law analysis
#[derive(Parser)]
#[command(name = "ledgerscope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a delimited export and write report files
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for report files
        #[arg(short, long, default_value = "outputs")]
        output_dir: PathBuf,

        /// JSON file with analysis settings (flags below override it)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum qualifying values for a column's Benford test
        #[arg(long)]
        min_sample_size: Option<usize>,

        /// Quantile interpolation for numeric summaries
        #[arg(long)]
        quantile: Option<QuantileChoice>,

        /// Skip distinct-value counts in column profiles
        #[arg(long)]
        no_distinct: bool,

        /// Run analysis passes one after another
        #[arg(long)]
        sequential: bool,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat the first line as data; columns are named column_1, column_2, ...
        #[arg(long)]
        no_header: bool,

        /// Read at most this many data rows
        #[arg(long)]
        max_rows: Option<usize>,

        /// Quote character for delimited fields
        #[arg(long, default_value_t = '"')]
        quote: char,

        /// Print the full result as JSON instead of writing files
        #[arg(long)]
        json: bool,
    },

    /// Print the default analysis settings as JSON
    Config,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum QuantileChoice {
    Linear,
    Nearest,
    Lower,
}

impl From<QuantileChoice> for QuantileMethod {
    fn from(choice: QuantileChoice) -> Self {
        match choice {
            QuantileChoice::Linear => QuantileMethod::Linear,
            QuantileChoice::Nearest => QuantileMethod::Nearest,
            QuantileChoice::Lower => QuantileMethod::Lower,
        }
    }
}
