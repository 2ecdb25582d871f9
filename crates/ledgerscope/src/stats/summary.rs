//! Descriptive statistics for numeric columns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{Column, Table};

/// Rule for computing a quantile from sorted values.
///
/// All methods place quantile `q` at position `h = (n - 1) * q` in the
/// sorted values and differ only in how a fractional `h` is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileMethod {
    /// Interpolate linearly between the two neighbouring order statistics.
    #[default]
    Linear,
    /// Take the nearest order statistic (halves round away from zero).
    Nearest,
    /// Take the order statistic below.
    Lower,
}

/// Quantile `q` (0.0-1.0) of already sorted values.
///
/// Returns `None` for an empty slice or a `q` outside `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64, method: QuantileMethod) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);

    let value = match method {
        QuantileMethod::Linear => {
            let fraction = h - lower as f64;
            sorted[lower] + fraction * (sorted[upper] - sorted[lower])
        }
        QuantileMethod::Nearest => sorted[(h.round() as usize).min(sorted.len() - 1)],
        QuantileMethod::Lower => sorted[lower],
    };

    Some(value)
}

/// Descriptive statistics of one numeric column.
///
/// Every field but `count` is `None` when the column has no values;
/// `std` is also `None` for a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    /// 25th percentile.
    pub p25: Option<f64>,
    /// Median.
    pub p50: Option<f64>,
    /// 75th percentile.
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }

    /// Interquartile range.
    pub fn iqr(&self) -> Option<f64> {
        Some(self.p75? - self.p25?)
    }
}

/// Welford's online mean/variance accumulator.
#[derive(Debug, Default)]
struct Moments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn sample_std(&self) -> Option<f64> {
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

/// Computes [`NumericSummary`] values for numeric columns.
pub struct NumericSummarizer {
    method: QuantileMethod,
}

impl NumericSummarizer {
    pub fn new() -> Self {
        Self::with_method(QuantileMethod::default())
    }

    pub fn with_method(method: QuantileMethod) -> Self {
        Self { method }
    }

    /// Summarize every column whose inferred kind is numeric, in table order.
    pub fn summarize(&self, table: &Table) -> Vec<NumericSummary> {
        table
            .columns()
            .iter()
            .filter(|c| c.infer_kind().kind.is_numeric())
            .map(|c| self.summarize_column(c))
            .collect()
    }

    /// Summarize the named columns, in table order. Unknown names are skipped.
    pub fn summarize_columns(&self, table: &Table, names: &[&str]) -> Vec<NumericSummary> {
        table
            .columns()
            .iter()
            .filter(|c| names.contains(&c.name.as_str()))
            .map(|c| self.summarize_column(c))
            .collect()
    }

    /// Summarize one column using its finite numeric values.
    pub fn summarize_column(&self, column: &Column) -> NumericSummary {
        let mut values: Vec<f64> = column.numeric_values().filter(|v| v.is_finite()).collect();

        if values.is_empty() {
            debug!(column = %column.name, "numeric column has no values");
            return NumericSummary::empty(&column.name);
        }

        let mut moments = Moments::default();
        for &v in &values {
            moments.add(v);
        }

        values.sort_by(f64::total_cmp);

        NumericSummary {
            column: column.name.clone(),
            count: values.len(),
            mean: Some(moments.mean),
            std: moments.sample_std(),
            min: values.first().copied(),
            p25: quantile(&values, 0.25, self.method),
            p50: quantile(&values, 0.50, self.method),
            p75: quantile(&values, 0.75, self.method),
            max: values.last().copied(),
        }
    }
}

impl Default for NumericSummarizer {
    fn default() -> Self {
        Self::new()
    }
}
