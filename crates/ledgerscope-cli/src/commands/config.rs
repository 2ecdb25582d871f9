//! Config command - print the default analysis settings.

use ledgerscope::AnalysisConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&AnalysisConfig::default())?);
    Ok(())
}
