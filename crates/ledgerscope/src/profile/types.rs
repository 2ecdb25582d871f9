//! Column profile types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::input::{ColumnKind, VariantCounts};

/// Observed value range of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueRange {
    Numeric { min: f64, max: f64 },
    Date { min: NaiveDateTime, max: NaiveDateTime },
}

/// Metadata summary of one table column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred kind.
    pub kind: ColumnKind,
    /// Number of non-null cells.
    pub non_null_count: usize,
    /// Number of null cells.
    pub null_count: usize,
    /// `100 * null_count / row_count`, or 0 for an empty table.
    pub null_percentage: f64,
    /// Min/max of numeric or date columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
    /// Number of distinct non-null values, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_count: Option<usize>,
    /// Whether the column mixed value variants and fell back to text.
    #[serde(default)]
    pub ambiguous: bool,
}

impl ColumnProfile {
    pub fn row_count(&self) -> usize {
        self.non_null_count + self.null_count
    }
}

/// A column whose values mixed several variants, so its kind was defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAmbiguity {
    pub column: String,
    /// Kind the column was assigned.
    pub resolved_kind: ColumnKind,
    /// Variants observed in the column.
    pub counts: VariantCounts,
}

/// Span of a date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub column: String,
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

/// Everything the profiler derives from a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableProfile {
    pub columns: Vec<ColumnProfile>,
    pub ambiguities: Vec<TypeAmbiguity>,
    pub date_ranges: Vec<DateRange>,
}

impl TableProfile {
    /// Names of columns profiled as numeric, in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| c.name.as_str())
    }
}

/// Compute a null percentage, defined as 0 when there are no rows.
pub fn null_percentage(null_count: usize, row_count: usize) -> f64 {
    if row_count == 0 {
        0.0
    } else {
        (null_count as f64 / row_count as f64) * 100.0
    }
}
