//! Analyze command - profile a file, run Benford tests, write reports.

use std::path::PathBuf;

use colored::Colorize;
use ledgerscope::report::{self, TOP_MISSING_LIMIT};
use ledgerscope::{AnalysisConfig, Analyzer, ParserConfig, QuantileMethod, ReportWriter};

pub struct AnalyzeArgs {
    pub file: PathBuf,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub min_sample_size: Option<usize>,
    pub quantile: Option<QuantileMethod>,
    pub no_distinct: bool,
    pub sequential: bool,
    pub delimiter: Option<char>,
    pub no_header: bool,
    pub max_rows: Option<usize>,
    pub quote: char,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(n) = args.min_sample_size {
        config.min_sample_size = n;
    }
    if let Some(method) = args.quantile {
        config.quantile_method = method;
    }
    if args.no_distinct {
        config.count_distinct = false;
    }
    if args.sequential {
        config.parallel = false;
    }

    let delimiter = args.delimiter.map(|c| ascii_byte("Delimiter", c)).transpose()?;
    let quote = ascii_byte("Quote", args.quote)?;

    let analyzer = Analyzer::with_config(config).with_parser_config(ParserConfig {
        delimiter,
        has_header: !args.no_header,
        max_rows: args.max_rows,
        quote,
    });

    if args.json {
        let (result, _) = analyzer.analyze_file(&args.file)?;
        println!("{}", report::to_json(&result)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        args.file.display().to_string().white()
    );

    let (result, source) = analyzer.analyze_file(&args.file)?;

    println!(
        "{} rows, {} columns ({}, {})",
        result.row_count.to_string().white().bold(),
        result.column_count.to_string().white().bold(),
        source.format,
        source.hash
    );

    if args.verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for col in &result.columns {
            println!(
                "  {:24} {:8} {:>6} nulls ({:.2}%)",
                col.name,
                col.kind.label(),
                col.null_count,
                col.null_percentage
            );
        }

        let missing: Vec<_> = result
            .missing_ranking(TOP_MISSING_LIMIT)
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .collect();
        if !missing.is_empty() {
            println!();
            println!("{}", "Most missing:".yellow().bold());
            for (name, count) in missing {
                println!("  {:24} {}", name, count);
            }
        }
    }

    println!();
    println!("{}", "Benford's Law:".yellow().bold());
    if result.benford_metrics.is_empty() {
        println!("  No numeric columns qualified");
    }
    for m in &result.benford_metrics {
        let chi = format!("{:.2}", m.chi_square);
        let chi = if m.exceeds_critical() { chi.red() } else { chi.green() };
        println!(
            "  {:24} n={:<8} MAD={:.4} chi2={}",
            m.column, m.sample_size, m.mad, chi
        );
    }
    for exclusion in &result.exclusions {
        println!(
            "  {:24} {}",
            exclusion.column,
            exclusion.reason.to_string().dimmed()
        );
    }

    for ambiguity in &result.ambiguities {
        println!(
            "{} column '{}' mixes value types, treated as {}",
            "Note:".yellow(),
            ambiguity.column,
            ambiguity.resolved_kind.label()
        );
    }

    let written = ReportWriter::new(&args.output_dir).write_all(&result)?;

    println!();
    println!(
        "{} {} files to {}",
        "Wrote".green().bold(),
        written.len(),
        args.output_dir.display().to_string().white()
    );

    Ok(())
}

fn ascii_byte(what: &str, c: char) -> Result<u8, Box<dyn std::error::Error>> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(format!("{} must be an ASCII character, got '{}'", what, c).into())
    }
}
