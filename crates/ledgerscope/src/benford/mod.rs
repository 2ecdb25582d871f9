//! Benford's Law first-digit analysis.
//!
//! Leading digits of a column's non-zero values are tallied and compared
//! with the expected proportions `log10(1 + 1/d)`. Two divergence measures
//! are reported: the mean absolute deviation of proportions, which does not
//! depend on sample size, and Pearson's chi-square statistic with 8 degrees
//! of freedom, which grows linearly with it.

mod analyzer;
mod digits;

pub use analyzer::{
    BenfordAnalyzer, BenfordMetrics, BenfordReport, DigitBin, DigitCounts, DigitDistribution,
    Exclusion, ExclusionReason, AGGREGATE_LABEL, DEFAULT_MIN_SAMPLE_SIZE,
};
pub use digits::{
    expected_distribution, expected_proportion, leading_digit, BENFORD_CHI_SQ_CRITICAL,
    DEGREES_OF_FREEDOM,
};
