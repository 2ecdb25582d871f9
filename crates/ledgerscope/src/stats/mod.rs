//! Descriptive statistics.

mod summary;

pub use summary::{quantile, NumericSummarizer, NumericSummary, QuantileMethod};
