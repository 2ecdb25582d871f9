//! Analysis orchestration and the public result type.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::benford::{
    BenfordAnalyzer, BenfordMetrics, BenfordReport, DigitDistribution, Exclusion,
    DEFAULT_MIN_SAMPLE_SIZE,
};
use crate::error::{LedgerError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata, Table};
use crate::profile::{ColumnProfile, DateRange, TableProfile, TableProfiler, TypeAmbiguity};
use crate::stats::{NumericSummarizer, NumericSummary, QuantileMethod};

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum qualifying values for a column's Benford test.
    pub min_sample_size: usize,
    /// Quantile rule for numeric summaries.
    pub quantile_method: QuantileMethod,
    /// Whether column profiles include distinct-value counts.
    pub count_distinct: bool,
    /// Run the profiler, summarizer and Benford pass concurrently.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            quantile_method: QuantileMethod::Linear,
            count_distinct: true,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LedgerError::io(path, e))?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_sample_size == 0 {
            return Err(LedgerError::Config(
                "min_sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of analyzing a table. Every per-column entry refers to its column by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub row_count: usize,
    pub column_count: usize,
    /// One profile per column, in table order.
    pub columns: Vec<ColumnProfile>,
    /// One summary per numeric column, in table order.
    pub numeric_summaries: Vec<NumericSummary>,
    /// Per-column digit distributions, then the aggregate.
    pub digit_distributions: Vec<DigitDistribution>,
    /// Per-column Benford metrics, then the aggregate.
    pub benford_metrics: Vec<BenfordMetrics>,
    /// Span of every date column, in table order.
    pub date_ranges: Vec<DateRange>,
    /// Columns whose kind was defaulted because of mixed values.
    pub ambiguities: Vec<TypeAmbiguity>,
    /// Columns left out of the Benford output.
    pub exclusions: Vec<Exclusion>,
}

impl AnalysisResult {
    fn assemble(
        table: &Table,
        profile: TableProfile,
        numeric_summaries: Vec<NumericSummary>,
        benford: BenfordReport,
    ) -> Self {
        Self {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns: profile.columns,
            numeric_summaries,
            digit_distributions: benford.distributions,
            benford_metrics: benford.metrics,
            date_ranges: profile.date_ranges,
            ambiguities: profile.ambiguities,
            exclusions: benford.exclusions,
        }
    }

    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a numeric summary by column name.
    pub fn numeric_summary(&self, name: &str) -> Option<&NumericSummary> {
        self.numeric_summaries.iter().find(|s| s.column == name)
    }

    /// Get Benford metrics by column name.
    pub fn benford_metrics_for(&self, name: &str) -> Option<&BenfordMetrics> {
        self.benford_metrics.iter().find(|m| m.column == name)
    }

    /// Get a digit distribution by column name.
    pub fn distribution_for(&self, name: &str) -> Option<&DigitDistribution> {
        self.digit_distributions.iter().find(|d| d.column == name)
    }

    /// Metrics over all qualifying numeric columns combined.
    pub fn aggregate_metrics(&self) -> Option<&BenfordMetrics> {
        self.benford_metrics.iter().find(|m| m.is_aggregate())
    }

    /// The first detected date column's span.
    pub fn primary_date_range(&self) -> Option<&DateRange> {
        self.date_ranges.first()
    }

    /// Columns with the most nulls first; ties keep table order.
    pub fn missing_ranking(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut ranking: Vec<(&str, usize)> = self
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.null_count))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking.truncate(limit);
        ranking
    }
}

/// Runs profiling, numeric summaries and Benford analysis over a table.
pub struct Analyzer {
    config: AnalysisConfig,
    parser: Parser,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
        }
    }

    /// Use a custom parser configuration for [`Analyzer::analyze_file`].
    pub fn with_parser_config(mut self, parser: ParserConfig) -> Self {
        self.parser = Parser::with_config(parser);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a loaded table.
    ///
    /// Fails with [`LedgerError::EmptyTable`] when the table has no columns.
    /// Short Benford samples and mixed-type columns are recorded in the
    /// result rather than raised.
    pub fn analyze(&self, table: &Table) -> Result<AnalysisResult> {
        self.config.validate()?;

        if table.column_count() == 0 {
            return Err(LedgerError::EmptyTable);
        }

        let span = info_span!(
            "analyze",
            rows = table.row_count(),
            columns = table.column_count()
        );
        let _guard = span.enter();

        let profiler = TableProfiler::new().with_distinct_counts(self.config.count_distinct);
        let summarizer = NumericSummarizer::with_method(self.config.quantile_method);
        let benford = BenfordAnalyzer::with_min_sample_size(self.config.min_sample_size);

        // The three passes share the read-only table and write disjoint outputs.
        let (profile, (summaries, report)) = if self.config.parallel {
            rayon::join(
                || profiler.profile(table),
                || {
                    rayon::join(
                        || summarizer.summarize(table),
                        || benford.analyze(table),
                    )
                },
            )
        } else {
            (
                profiler.profile(table),
                (summarizer.summarize(table), benford.analyze(table)),
            )
        };

        let result = AnalysisResult::assemble(table, profile?, summaries, report);

        info!(
            numeric_columns = result.numeric_summaries.len(),
            benford_entries = result.benford_metrics.len(),
            exclusions = result.exclusions.len(),
            ambiguities = result.ambiguities.len(),
            "analysis complete"
        );

        Ok(result)
    }

    /// Load a delimited file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<(AnalysisResult, SourceMetadata)> {
        let (table, source) = self.parser.parse_file(path)?;
        let result = self.analyze(&table)?;
        Ok((result, source))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
