//! Writes every report file into an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::error::{LedgerError, Result};

use super::{
    benford_csv, benford_metrics_csv, column_profile_csv, markdown_summary, numeric_summary_csv,
    summary_json, to_json,
};

/// Writes the JSON, CSV and Markdown reports for an analysis.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and write all reports. Returns the written paths.
    pub fn write_all(&self, result: &AnalysisResult) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| LedgerError::io(&self.output_dir, e))?;

        let mut files = vec![
            ("summary.json", summary_json(result)?),
            ("analysis.json", to_json(result)?),
            ("column_profile.csv", column_profile_csv(result)?),
        ];
        if let Some(numeric) = numeric_summary_csv(result)? {
            files.push(("numeric_summary.csv", numeric));
        }
        files.push(("benford_distribution.csv", benford_csv(result)?));
        files.push(("benford_metrics.csv", benford_metrics_csv(result)?));
        files.push(("summary.md", markdown_summary(result)));

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = self.output_dir.join(name);
            fs::write(&path, content).map_err(|e| LedgerError::io(&path, e))?;
            debug!(path = %path.display(), "wrote report");
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CellValue, Column, Table};
    use crate::Analyzer;

    #[test]
    fn test_write_all_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("outputs");

        let values: Vec<CellValue> = (1..=50).map(|i| CellValue::Numeric(i as f64)).collect();
        let table = Table::new(vec![Column::new("amount", values)]).unwrap();
        let result = Analyzer::new().analyze(&table).unwrap();

        let written = ReportWriter::new(&out).write_all(&result).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "summary.json",
                "analysis.json",
                "column_profile.csv",
                "numeric_summary.csv",
                "benford_distribution.csv",
                "benford_metrics.csv",
                "summary.md",
            ]
        );
        assert!(written.iter().all(|p| p.exists()));

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["row_count"], 50);
        assert_eq!(summary["dtypes"]["amount"], "numeric");
    }

    #[test]
    fn test_skips_numeric_summary_without_numeric_columns() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::new(vec![Column::new("memo", vec!["x".into()])]).unwrap();
        let result = Analyzer::new().analyze(&table).unwrap();

        let written = ReportWriter::new(dir.path()).write_all(&result).unwrap();
        assert_eq!(written.len(), 6);
        assert!(!dir.path().join("numeric_summary.csv").exists());
    }
}
