//! Report rendering: JSON, CSV and Markdown views of an [`AnalysisResult`].

mod markdown;
mod tables;
mod writer;

use indexmap::IndexMap;
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::error::Result;

pub use markdown::markdown_summary;
pub use tables::{benford_csv, benford_metrics_csv, column_profile_csv, numeric_summary_csv};
pub use writer::ReportWriter;

/// Number of columns listed in the missing-value section of summaries.
pub const TOP_MISSING_LIMIT: usize = 10;

/// Min/max of a date column as display strings.
#[derive(Debug, Clone, Serialize)]
pub struct DateSpan {
    pub min: String,
    pub max: String,
}

/// Compact run overview, keyed by column name in table order.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub dtypes: IndexMap<String, String>,
    /// Null counts, largest first.
    pub missing_values: IndexMap<String, usize>,
    pub date_ranges: IndexMap<String, DateSpan>,
}

impl Summary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            row_count: result.row_count,
            column_count: result.column_count,
            columns: result.columns.iter().map(|c| c.name.clone()).collect(),
            dtypes: result
                .columns
                .iter()
                .map(|c| (c.name.clone(), c.kind.label().to_string()))
                .collect(),
            missing_values: result
                .missing_ranking(result.columns.len())
                .into_iter()
                .map(|(name, count)| (name.to_string(), count))
                .collect(),
            date_ranges: result
                .date_ranges
                .iter()
                .map(|r| {
                    (
                        r.column.clone(),
                        DateSpan {
                            min: r.min.to_string(),
                            max: r.max.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Pretty JSON of the full analysis result.
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Pretty JSON of the compact [`Summary`].
pub fn summary_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Summary::from_result(result))?)
}

/// Round to `places` decimal places for display.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
