//! Per-column profiling: kind, missingness, ranges.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};
use crate::input::{CellValue, Column, ColumnKind, Table};

use super::types::{
    null_percentage, ColumnProfile, DateRange, TableProfile, TypeAmbiguity, ValueRange,
};

/// Hashable identity of a non-null cell, for distinct counting.
#[derive(PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Numeric(u64),
    Text(&'a str),
    Date(NaiveDateTime),
}

impl<'a> DistinctKey<'a> {
    fn of(cell: &'a CellValue) -> Option<Self> {
        match cell {
            // -0.0 and 0.0 are the same value.
            CellValue::Numeric(v) if *v == 0.0 => Some(DistinctKey::Numeric(0.0f64.to_bits())),
            CellValue::Numeric(v) => Some(DistinctKey::Numeric(v.to_bits())),
            CellValue::Text(s) => Some(DistinctKey::Text(s)),
            CellValue::Date(d) => Some(DistinctKey::Date(*d)),
            CellValue::Null => None,
        }
    }
}

/// Builds a [`ColumnProfile`] for every column of a table.
pub struct TableProfiler {
    count_distinct: bool,
}

impl TableProfiler {
    /// Create a profiler that also counts distinct values.
    pub fn new() -> Self {
        Self {
            count_distinct: true,
        }
    }

    /// Enable or disable distinct-value counting.
    pub fn with_distinct_counts(mut self, enabled: bool) -> Self {
        self.count_distinct = enabled;
        self
    }

    /// Profile every column, in table order.
    ///
    /// Fails with [`LedgerError::EmptyTable`] when the table has no columns.
    /// A table with columns but no rows is valid.
    pub fn profile(&self, table: &Table) -> Result<TableProfile> {
        if table.column_count() == 0 {
            return Err(LedgerError::EmptyTable);
        }

        let row_count = table.row_count();
        let mut result = TableProfile::default();

        for (position, column) in table.columns().iter().enumerate() {
            let inference = column.infer_kind();
            let null_count = inference.counts.null;
            let non_null_count = inference.counts.non_null();

            if inference.ambiguous {
                warn!(
                    column = %column.name,
                    numeric = inference.counts.numeric,
                    text = inference.counts.text,
                    date = inference.counts.date,
                    "mixed value types, treating column as text"
                );
                result.ambiguities.push(TypeAmbiguity {
                    column: column.name.clone(),
                    resolved_kind: inference.kind,
                    counts: inference.counts,
                });
            }

            let range = value_range(column, inference.kind);
            if let Some(ValueRange::Date { min, max }) = range {
                result.date_ranges.push(DateRange {
                    column: column.name.clone(),
                    min,
                    max,
                });
            }

            let distinct_count = self.count_distinct.then(|| distinct_count(column));

            debug!(
                column = %column.name,
                kind = inference.kind.label(),
                nulls = null_count,
                "profiled column"
            );

            result.columns.push(ColumnProfile {
                name: column.name.clone(),
                position,
                kind: inference.kind,
                non_null_count,
                null_count,
                null_percentage: null_percentage(null_count, row_count),
                range,
                distinct_count,
                ambiguous: inference.ambiguous,
            });
        }

        Ok(result)
    }
}

impl Default for TableProfiler {
    fn default() -> Self {
        Self::new()
    }
}

fn value_range(column: &Column, kind: ColumnKind) -> Option<ValueRange> {
    match kind {
        ColumnKind::Numeric => {
            let mut values = column.numeric_values().filter(|v| v.is_finite());
            let first = values.next()?;
            let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            Some(ValueRange::Numeric { min, max })
        }
        ColumnKind::Date => {
            let mut dates = column.cells.iter().filter_map(CellValue::as_date);
            let first = dates.next()?;
            let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
            Some(ValueRange::Date { min, max })
        }
        ColumnKind::Text | ColumnKind::Empty => None,
    }
}

fn distinct_count(column: &Column) -> usize {
    column
        .cells
        .iter()
        .filter_map(DistinctKey::of)
        .collect::<HashSet<_>>()
        .len()
}
