//! Example: Profile a journal-entry export and test it against Benford's Law.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use ledgerscope::Analyzer;

fn main() -> ledgerscope::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let (result, source) = Analyzer::new().analyze_file(path)?;

    println!("## Source");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Rows: {}", result.row_count);
    println!("  Columns: {}", result.column_count);
    println!();

    println!("## Columns");
    for col in &result.columns {
        println!(
            "  {:20} {:8} nulls={:<6} ({:.2}%)",
            col.name,
            col.kind.label(),
            col.null_count,
            col.null_percentage
        );
    }
    println!();

    if let Some(range) = result.primary_date_range() {
        println!("## Dates");
        println!("  {}: {} .. {}", range.column, range.min, range.max);
        println!();
    }

    println!("## Benford");
    for m in &result.benford_metrics {
        println!(
            "  {:20} n={:<8} MAD={:.4} chi2={:.2}{}",
            m.column,
            m.sample_size,
            m.mad,
            m.chi_square,
            if m.exceeds_critical() { "  (above critical)" } else { "" }
        );
    }
    for exclusion in &result.exclusions {
        println!("  {:20} skipped: {}", exclusion.column, exclusion.reason);
    }

    Ok(())
}
