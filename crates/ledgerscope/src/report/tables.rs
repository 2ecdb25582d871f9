//! CSV renderings of profiles, summaries and Benford output.

use crate::analysis::AnalysisResult;
use crate::error::{LedgerError, Result};

use super::round_to;

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// `column,dtype,non_null_count,null_count,null_percent`, one row per column.
pub fn column_profile_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["column", "dtype", "non_null_count", "null_count", "null_percent"])?;

    for column in &result.columns {
        writer.write_record([
            column.name.clone(),
            column.kind.label().to_string(),
            column.non_null_count.to_string(),
            column.null_count.to_string(),
            round_to(column.null_percentage, 2).to_string(),
        ])?;
    }

    finish(writer)
}

/// Descriptive statistics per numeric column, or `None` when there are none.
pub fn numeric_summary_csv(result: &AnalysisResult) -> Result<Option<String>> {
    if result.numeric_summaries.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"])?;

    for s in &result.numeric_summaries {
        writer.write_record([
            s.column.clone(),
            s.count.to_string(),
            opt(s.mean),
            opt(s.std),
            opt(s.min),
            opt(s.p25),
            opt(s.p50),
            opt(s.p75),
            opt(s.max),
        ])?;
    }

    finish(writer).map(Some)
}

/// One row per (column, digit) of every digit distribution.
pub fn benford_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "column",
        "digit",
        "observed_count",
        "observed_proportion",
        "expected_proportion",
    ])?;

    for dist in &result.digit_distributions {
        for bin in &dist.bins {
            writer.write_record([
                dist.column.clone(),
                bin.digit.to_string(),
                bin.observed_count.to_string(),
                bin.observed_proportion.to_string(),
                bin.expected_proportion.to_string(),
            ])?;
        }
    }

    finish(writer)
}

/// One row per Benford metrics entry.
pub fn benford_metrics_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["column", "sample_size", "mad", "chi_square", "degrees_of_freedom"])?;

    for m in &result.benford_metrics {
        writer.write_record([
            m.column.clone(),
            m.sample_size.to_string(),
            m.mad.to_string(),
            m.chi_square.to_string(),
            m.degrees_of_freedom.to_string(),
        ])?;
    }

    finish(writer)
}
