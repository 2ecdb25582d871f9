//! Typed cell values and column kind inference.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single table cell, classified once at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Numeric(f64),
    Text(String),
    Date(NaiveDateTime),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The numeric payload, if this is a numeric cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// The date payload, if this is a date cell.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Numeric(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-null value is a number.
    Numeric,
    /// Every non-null value is a calendar date or timestamp.
    Date,
    /// Free text, categorical values, or a mixture of variants.
    Text,
    /// No non-null values and no declared kind.
    #[default]
    Empty,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }

    /// Short label used in reports (the `dtype` column).
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

/// Number of cells of each variant in a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCounts {
    pub numeric: usize,
    pub text: usize,
    pub date: usize,
    pub null: usize,
}

impl VariantCounts {
    /// Tally the variants of a sequence of cells.
    pub fn tally<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut counts = Self::default();
        for cell in cells {
            match cell {
                CellValue::Numeric(_) => counts.numeric += 1,
                CellValue::Text(_) => counts.text += 1,
                CellValue::Date(_) => counts.date += 1,
                CellValue::Null => counts.null += 1,
            }
        }
        counts
    }

    pub fn non_null(&self) -> usize {
        self.numeric + self.text + self.date
    }

    /// Number of distinct non-null variants present.
    pub fn variants_present(&self) -> usize {
        [self.numeric, self.text, self.date]
            .iter()
            .filter(|&&n| n > 0)
            .count()
    }
}

/// Outcome of inferring a column's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInference {
    pub kind: ColumnKind,
    pub counts: VariantCounts,
    /// True when more than one non-null variant was seen.
    pub ambiguous: bool,
}

/// Infer a column's kind from its cells.
///
/// A column is numeric (or date, or text) only when every non-null cell has
/// that variant. Mixed columns fall back to [`ColumnKind::Text`] and are
/// marked ambiguous. Columns without any non-null cell take the declared
/// kind when the loader supplied one.
pub fn infer_kind(cells: &[CellValue], declared: Option<ColumnKind>) -> KindInference {
    let counts = VariantCounts::tally(cells);

    let (kind, ambiguous) = match counts.variants_present() {
        0 => (declared.unwrap_or(ColumnKind::Empty), false),
        1 if counts.numeric > 0 => (ColumnKind::Numeric, false),
        1 if counts.date > 0 => (ColumnKind::Date, false),
        1 => (ColumnKind::Text, false),
        _ => (ColumnKind::Text, true),
    };

    KindInference {
        kind,
        counts,
        ambiguous,
    }
}
