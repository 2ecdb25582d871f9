//! Ledgerscope: profiling and Benford's Law analysis of journal-entry tables.
//!
//! A loaded [`Table`] of typed cells goes through three independent passes:
//! column profiling, descriptive statistics for numeric columns, and a
//! first-digit test of every numeric column against Benford's Law. The
//! [`Analyzer`] joins them into one [`AnalysisResult`], which the
//! [`report`] module renders as JSON, CSV and Markdown.
//!
//! Ledgerscope reports divergence metrics only; it does not classify
//! individual entries.
//!
//! # Example
//!
//! ```no_run
//! use ledgerscope::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let (result, _source) = analyzer.analyze_file("journal_entries.csv").unwrap();
//!
//! for metrics in &result.benford_metrics {
//!     println!("{}: MAD {:.4}, chi-square {:.2}", metrics.column, metrics.mad, metrics.chi_square);
//! }
//! ```

pub mod benford;
pub mod error;
pub mod input;
pub mod profile;
pub mod report;
pub mod stats;

mod analysis;

pub use crate::analysis::{AnalysisConfig, AnalysisResult, Analyzer};
pub use benford::{
    BenfordAnalyzer, BenfordMetrics, DigitDistribution, Exclusion, ExclusionReason,
    AGGREGATE_LABEL,
};
pub use error::{LedgerError, Result};
pub use input::{CellValue, Column, ColumnKind, Parser, ParserConfig, SourceMetadata, Table};
pub use profile::{ColumnProfile, DateRange, TableProfiler, TypeAmbiguity, ValueRange};
pub use report::ReportWriter;
pub use stats::{NumericSummarizer, NumericSummary, QuantileMethod};
