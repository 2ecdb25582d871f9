//! Ledgerscope CLI - journal-entry profiling and Benford's Law analysis.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "ledgerscope=debug" } else { "ledgerscope=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            output_dir,
            config,
            min_sample_size,
            quantile,
            no_distinct,
            sequential,
            delimiter,
            no_header,
            max_rows,
            quote,
            json,
        } => commands::analyze::run(commands::analyze::AnalyzeArgs {
            file,
            output_dir,
            config,
            min_sample_size,
            quantile: quantile.map(Into::into),
            no_distinct,
            sequential,
            delimiter,
            no_header,
            max_rows,
            quote,
            json,
            verbose: cli.verbose,
        }),

        Commands::Config => commands::config::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
