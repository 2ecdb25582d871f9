//! Observed-vs-expected leading-digit distributions and fit metrics.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::input::Table;

use super::digits::{
    expected_proportion, leading_digit, BENFORD_CHI_SQ_CRITICAL, DEGREES_OF_FREEDOM,
};

/// Column label of the entry that pools every qualifying numeric column.
pub const AGGREGATE_LABEL: &str = "__all_numeric__";

/// Default minimum number of qualifying values for a Benford test.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 30;

/// Tally of leading digits 1-9.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitCounts {
    counts: [usize; 9],
}

impl DigitCounts {
    /// Count the leading digits of values. Zero and non-finite values are skipped.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut tally = Self::default();
        for digit in values.into_iter().filter_map(leading_digit) {
            tally.add(digit);
        }
        tally
    }

    /// Build from explicit per-digit counts (index 0 is digit 1).
    pub fn from_counts(counts: [usize; 9]) -> Self {
        Self { counts }
    }

    /// Record one value with leading digit `digit` (1-9).
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in 1..=9.
    pub fn add(&mut self, digit: u8) {
        assert!((1..=9).contains(&digit), "leading digit out of range: {digit}");
        self.counts[digit as usize - 1] += 1;
    }

    pub fn merge(&mut self, other: &DigitCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }

    /// Count for `digit` (1-9).
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in 1..=9.
    pub fn count(&self, digit: u8) -> usize {
        assert!((1..=9).contains(&digit), "leading digit out of range: {digit}");
        self.counts[digit as usize - 1]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Observed proportion of each digit; all zero for an empty tally.
    pub fn proportions(&self) -> [f64; 9] {
        let total = self.total();
        std::array::from_fn(|i| {
            if total == 0 {
                0.0
            } else {
                self.counts[i] as f64 / total as f64
            }
        })
    }

    /// Mean absolute deviation between observed and expected proportions.
    pub fn mad(&self) -> f64 {
        let observed = self.proportions();
        let deviation: f64 = (1..=9u8)
            .zip(observed)
            .map(|(d, p)| (p - expected_proportion(d)).abs())
            .sum();
        deviation / 9.0
    }

    /// Pearson chi-square statistic against the Benford expected counts.
    pub fn chi_square(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }

        (1..=9u8)
            .map(|d| {
                let expected = expected_proportion(d) * total;
                let observed = self.count(d) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }
}

/// One row of a digit distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitBin {
    pub digit: u8,
    pub observed_count: usize,
    pub observed_proportion: f64,
    pub expected_proportion: f64,
}

/// Observed and expected leading-digit distribution of one column (or the aggregate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitDistribution {
    pub column: String,
    pub sample_size: usize,
    pub bins: [DigitBin; 9],
}

impl DigitDistribution {
    pub fn from_counts(column: impl Into<String>, counts: &DigitCounts) -> Self {
        let observed = counts.proportions();
        Self {
            column: column.into(),
            sample_size: counts.total(),
            bins: std::array::from_fn(|i| {
                let digit = i as u8 + 1;
                DigitBin {
                    digit,
                    observed_count: counts.count(digit),
                    observed_proportion: observed[i],
                    expected_proportion: expected_proportion(digit),
                }
            }),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.column == AGGREGATE_LABEL
    }
}

/// Goodness-of-fit metrics of one column (or the aggregate) against Benford's Law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenfordMetrics {
    pub column: String,
    /// Mean absolute deviation of observed from expected proportions.
    pub mad: f64,
    pub chi_square: f64,
    pub degrees_of_freedom: u32,
    pub sample_size: usize,
}

impl BenfordMetrics {
    pub fn from_counts(column: impl Into<String>, counts: &DigitCounts) -> Self {
        Self {
            column: column.into(),
            mad: counts.mad(),
            chi_square: counts.chi_square(),
            degrees_of_freedom: DEGREES_OF_FREEDOM,
            sample_size: counts.total(),
        }
    }

    /// Whether chi-square exceeds the 5% critical value at 8 degrees of freedom.
    pub fn exceeds_critical(&self) -> bool {
        self.chi_square > BENFORD_CHI_SQ_CRITICAL
    }

    pub fn is_aggregate(&self) -> bool {
        self.column == AGGREGATE_LABEL
    }
}

/// Why a column was left out of the Benford output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Too few non-zero finite values for a reliable test.
    InsufficientSample { qualifying: usize, required: usize },
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::InsufficientSample {
                qualifying,
                required,
            } => write!(
                f,
                "insufficient sample: {qualifying} qualifying values, {required} required"
            ),
        }
    }
}

/// A column omitted from analysis output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub column: String,
    pub reason: ExclusionReason,
}

/// Output of a Benford pass over a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenfordReport {
    /// Per-column distributions in table order, then the aggregate.
    pub distributions: Vec<DigitDistribution>,
    /// Per-column metrics in table order, then the aggregate.
    pub metrics: Vec<BenfordMetrics>,
    pub exclusions: Vec<Exclusion>,
}

/// Runs first-digit tests over the numeric columns of a table.
pub struct BenfordAnalyzer {
    min_sample_size: usize,
}

impl BenfordAnalyzer {
    pub fn new() -> Self {
        Self::with_min_sample_size(DEFAULT_MIN_SAMPLE_SIZE)
    }

    /// Create an analyzer requiring at least `min_sample_size` qualifying values
    /// per column. A value of 0 is treated as 1.
    pub fn with_min_sample_size(min_sample_size: usize) -> Self {
        Self {
            min_sample_size: min_sample_size.max(1),
        }
    }

    pub fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    /// Analyze every numeric column of the table plus their pooled aggregate.
    pub fn analyze(&self, table: &Table) -> BenfordReport {
        let columns = table
            .columns()
            .iter()
            .filter(|c| c.infer_kind().kind.is_numeric())
            .map(|c| (c.name.as_str(), c.numeric_values()));

        self.analyze_columns(columns)
    }

    /// Analyze named value sequences. Sequences are reported in the order given.
    pub fn analyze_columns<'a, I, V>(&self, columns: I) -> BenfordReport
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: IntoIterator<Item = f64>,
    {
        let mut report = BenfordReport::default();
        let mut aggregate = DigitCounts::default();
        let mut qualified = 0usize;

        for (name, values) in columns {
            let counts = DigitCounts::from_values(values);
            let qualifying = counts.total();

            if qualifying < self.min_sample_size {
                warn!(
                    column = name,
                    qualifying,
                    required = self.min_sample_size,
                    "excluding column from Benford analysis"
                );
                report.exclusions.push(Exclusion {
                    column: name.to_string(),
                    reason: ExclusionReason::InsufficientSample {
                        qualifying,
                        required: self.min_sample_size,
                    },
                });
                continue;
            }

            let metrics = BenfordMetrics::from_counts(name, &counts);
            debug!(
                column = name,
                sample_size = qualifying,
                mad = metrics.mad,
                chi_square = metrics.chi_square,
                "benford metrics"
            );

            report.distributions.push(DigitDistribution::from_counts(name, &counts));
            report.metrics.push(metrics);
            aggregate.merge(&counts);
            qualified += 1;
        }

        // Every pooled column met the minimum on its own, so the pool does too.
        if qualified > 0 {
            report
                .distributions
                .push(DigitDistribution::from_counts(AGGREGATE_LABEL, &aggregate));
            report
                .metrics
                .push(BenfordMetrics::from_counts(AGGREGATE_LABEL, &aggregate));
        }

        report
    }
}

impl Default for BenfordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CellValue, Column};

    /// 1000 values whose leading digits follow the rounded Benford counts.
    fn benford_counts() -> DigitCounts {
        DigitCounts::from_counts([301, 176, 125, 97, 79, 67, 58, 51, 46])
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let total: f64 = benford_counts().proportions().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_conforming_counts_have_tiny_mad_and_chi_square() {
        let counts = benford_counts();
        assert!(counts.mad() < 0.001);
        assert!(counts.chi_square() < 0.1);
        assert!(counts.chi_square() < BENFORD_CHI_SQ_CRITICAL);
    }

    #[test]
    fn test_uniform_digits_violate() {
        let counts = DigitCounts::from_counts([100; 9]);
        assert!(counts.chi_square() > BENFORD_CHI_SQ_CRITICAL);
        assert!(counts.mad() > 0.05);
    }

    #[test]
    fn test_all_ones_is_maximally_anomalous() {
        let values: Vec<f64> = (0..40).map(|i| 10f64.powi(i % 8)).collect();
        let counts = DigitCounts::from_values(values);

        assert_eq!(counts.count(1), 40);
        let expected_mad = ((1.0 - expected_proportion(1))
            + (2..=9u8).map(expected_proportion).sum::<f64>())
            / 9.0;
        assert!((counts.mad() - expected_mad).abs() < 1e-12);

        let observed = counts.proportions();
        assert!((observed[0] - expected_proportion(1) - 0.699).abs() < 1e-3);
        assert!(counts.chi_square() > 20.09);
    }

    #[test]
    fn test_doubling_sample_doubles_chi_square_only() {
        let counts = DigitCounts::from_counts([50, 30, 20, 20, 10, 10, 5, 3, 2]);
        let mut doubled = counts;
        doubled.merge(&counts);

        assert!((doubled.mad() - counts.mad()).abs() < 1e-12);
        assert!((doubled.chi_square() - 2.0 * counts.chi_square()).abs() < 1e-9);
    }

    #[test]
    fn test_negative_values_use_magnitude() {
        let counts = DigitCounts::from_values([-2.5, 2.5, -0.25, 0.0]);
        assert_eq!(counts.count(2), 3);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_distribution_bins() {
        let dist = DigitDistribution::from_counts("amount", &benford_counts());
        assert_eq!(dist.sample_size, 1000);
        assert_eq!(dist.bins[0].digit, 1);
        assert_eq!(dist.bins[0].observed_count, 301);
        assert!((dist.bins[0].observed_proportion - 0.301).abs() < 1e-12);
        assert_eq!(dist.bins[8].digit, 9);
        let expected: f64 = dist.bins.iter().map(|b| b.expected_proportion).sum();
        assert!((expected - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_column_is_excluded() {
        let analyzer = BenfordAnalyzer::new();
        let report = analyzer.analyze_columns([("amount", vec![1.0, 2.0, 3.0])]);

        assert!(report.distributions.is_empty());
        assert!(report.metrics.is_empty());
        assert_eq!(
            report.exclusions,
            vec![Exclusion {
                column: "amount".to_string(),
                reason: ExclusionReason::InsufficientSample {
                    qualifying: 3,
                    required: 30,
                },
            }]
        );
    }

    #[test]
    fn test_all_zero_column_is_excluded() {
        let table = Table::new(vec![Column::new("amount", vec![CellValue::Numeric(0.0); 100])])
            .unwrap();
        let report = BenfordAnalyzer::new().analyze(&table);

        assert!(report.metrics.is_empty());
        assert_eq!(report.exclusions.len(), 1);
        assert_eq!(
            report.exclusions[0].reason,
            ExclusionReason::InsufficientSample {
                qualifying: 0,
                required: 30,
            }
        );
    }

    #[test]
    fn test_aggregate_pools_qualifying_columns() {
        let debit: Vec<f64> = (1..=40).map(|i| i as f64 * 10.0).collect();
        let credit: Vec<f64> = (1..=50).map(|i| i as f64 * 3.0).collect();
        let short = vec![7.0; 5];

        let report = BenfordAnalyzer::new().analyze_columns([
            ("debit", debit),
            ("short", short),
            ("credit", credit),
        ]);

        let names: Vec<&str> = report.metrics.iter().map(|m| m.column.as_str()).collect();
        assert_eq!(names, vec!["debit", "credit", AGGREGATE_LABEL]);

        let aggregate = report.metrics.last().unwrap();
        assert!(aggregate.is_aggregate());
        assert_eq!(aggregate.sample_size, 90);
        assert_eq!(aggregate.degrees_of_freedom, 8);
        assert_eq!(report.exclusions.len(), 1);
        assert_eq!(report.exclusions[0].column, "short");
    }

    #[test]
    fn test_no_numeric_columns_gives_empty_report() {
        let table = Table::new(vec![Column::new("memo", vec!["a".into(); 50])]).unwrap();
        let report = BenfordAnalyzer::new().analyze(&table);
        assert_eq!(report, BenfordReport::default());
    }

    #[test]
    fn test_single_digit_column_is_valid() {
        let report = BenfordAnalyzer::new().analyze_columns([("fees", vec![5.0; 30])]);
        assert_eq!(report.metrics.len(), 2);
        assert!(report.metrics[0].exceeds_critical());
    }

    #[test]
    fn test_zero_minimum_is_clamped() {
        assert_eq!(BenfordAnalyzer::with_min_sample_size(0).min_sample_size(), 1);
    }

    #[test]
    #[should_panic(expected = "leading digit out of range")]
    fn test_add_rejects_zero_digit() {
        DigitCounts::default().add(0);
    }

    #[test]
    #[should_panic(expected = "leading digit out of range")]
    fn test_count_rejects_out_of_range_digit() {
        DigitCounts::default().count(10);
    }

    #[test]
    fn test_exclusion_reason_display() {
        let reason = ExclusionReason::InsufficientSample {
            qualifying: 3,
            required: 30,
        };
        assert_eq!(
            reason.to_string(),
            "insufficient sample: 3 qualifying values, 30 required"
        );
    }
}
