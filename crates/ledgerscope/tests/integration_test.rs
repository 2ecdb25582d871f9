//! Integration tests for ledgerscope.

use std::io::Write;

use chrono::{Duration, NaiveDate};
use tempfile::NamedTempFile;

use ledgerscope::benford::BENFORD_CHI_SQ_CRITICAL;
use ledgerscope::{
    AnalysisConfig, Analyzer, CellValue, Column, ColumnKind, ExclusionReason, LedgerError,
    ReportWriter, Table, AGGREGATE_LABEL,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Log-uniform amounts spanning four orders of magnitude; their leading
/// digits follow Benford's Law closely.
fn benford_amounts(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 10f64.powf(1.0 + 4.0 * (i as f64 + 0.5) / n as f64))
        .collect()
}

fn journal_table() -> Table {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let amount: Vec<CellValue> = benford_amounts(1000).into_iter().map(CellValue::from).collect();
    let date: Vec<CellValue> = (0..1000)
        .map(|i| CellValue::Date(start + Duration::days(i % 365)))
        .collect();
    let memo: Vec<CellValue> = (0..1000)
        .map(|i| {
            if i % 20 == 0 {
                CellValue::Null
            } else {
                CellValue::Text(format!("entry {}", i % 7))
            }
        })
        .collect();

    Table::new(vec![
        Column::new("amount", amount),
        Column::new("date", date),
        Column::new("memo", memo),
    ])
    .unwrap()
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_journal_entry_scenario() {
    let result = Analyzer::new().analyze(&journal_table()).expect("Analysis failed");

    assert_eq!(result.row_count, 1000);
    assert_eq!(result.column_count, 3);

    let memo = result.column("memo").unwrap();
    assert_eq!(memo.kind, ColumnKind::Text);
    assert_eq!(memo.null_count, 50);
    assert_eq!(memo.null_percentage, 5.0);

    assert_eq!(result.column("date").unwrap().kind, ColumnKind::Date);
    assert_eq!(result.date_ranges.len(), 1);
    assert_eq!(result.date_ranges[0].column, "date");

    let summarized: Vec<&str> = result
        .numeric_summaries
        .iter()
        .map(|s| s.column.as_str())
        .collect();
    assert_eq!(summarized, vec!["amount"]);

    let per_column: Vec<&str> = result
        .benford_metrics
        .iter()
        .filter(|m| !m.is_aggregate())
        .map(|m| m.column.as_str())
        .collect();
    assert_eq!(per_column, vec!["amount"]);
    assert!(result.exclusions.is_empty());
}

#[test]
fn test_all_zero_column_is_excluded_not_fatal() {
    let table = Table::new(vec![
        Column::new("amount", vec![CellValue::Numeric(0.0); 500]),
        Column::new("memo", vec![CellValue::from("x"); 500]),
    ])
    .unwrap();

    let result = Analyzer::new().analyze(&table).expect("Analysis failed");

    assert!(result.benford_metrics.is_empty());
    assert!(result.digit_distributions.is_empty());
    assert_eq!(result.exclusions.len(), 1);
    assert_eq!(result.exclusions[0].column, "amount");
    assert_eq!(
        result.exclusions[0].reason,
        ExclusionReason::InsufficientSample {
            qualifying: 0,
            required: 30
        }
    );
    // Summaries still cover the column.
    assert_eq!(result.numeric_summary("amount").unwrap().count, 500);
}

#[test]
fn test_zero_column_table_fails() {
    let table = Table::new(Vec::new()).unwrap();
    assert!(matches!(
        Analyzer::new().analyze(&table),
        Err(LedgerError::EmptyTable)
    ));
}

#[test]
fn test_zero_row_table_profiles() {
    let table = Table::new(vec![Column::new("amount", Vec::new()), Column::new("memo", Vec::new())])
        .unwrap();
    let result = Analyzer::new().analyze(&table).expect("Analysis failed");

    assert_eq!(result.row_count, 0);
    assert_eq!(result.columns.len(), 2);
    assert!(result.columns.iter().all(|c| c.null_percentage == 0.0));
    assert!(result.benford_metrics.is_empty());
}

// =============================================================================
// Benford Known Cases
// =============================================================================

#[test]
fn test_benford_conforming_data() {
    let table = Table::new(vec![Column::new(
        "amount",
        benford_amounts(10_000).into_iter().map(CellValue::from).collect(),
    )])
    .unwrap();

    let result = Analyzer::new().analyze(&table).unwrap();
    let metrics = result.benford_metrics_for("amount").unwrap();

    assert!(metrics.mad < 0.001, "mad = {}", metrics.mad);
    assert!(metrics.chi_square < 1.0, "chi2 = {}", metrics.chi_square);
    assert!(!metrics.exceeds_critical());
    assert_eq!(metrics.degrees_of_freedom, 8);
    assert_eq!(metrics.sample_size, 10_000);
}

#[test]
fn test_powers_of_ten_are_maximally_anomalous() {
    let values: Vec<CellValue> = (0..100)
        .map(|i| CellValue::Numeric(10f64.powi(i % 10 - 3)))
        .collect();
    let table = Table::new(vec![Column::new("amount", values)]).unwrap();

    let result = Analyzer::new().analyze(&table).unwrap();
    let dist = result.distribution_for("amount").unwrap();
    let metrics = result.benford_metrics_for("amount").unwrap();

    assert_eq!(dist.bins[0].observed_count, 100);
    assert!((dist.bins[0].observed_proportion - dist.bins[0].expected_proportion - 0.699).abs() < 1e-3);
    assert!(metrics.chi_square > 10.0 * BENFORD_CHI_SQ_CRITICAL);
    // Digit 1 deviates by 1 - p(1); every other digit by its full expected share.
    assert!((metrics.mad - 2.0 * (1.0 - dist.bins[0].expected_proportion) / 9.0).abs() < 1e-12);
}

#[test]
fn test_duplicated_dataset_doubles_chi_square() {
    let base: Vec<f64> = (1..=300).map(|i| (i * i) as f64 * 1.7).collect();
    let doubled: Vec<f64> = base.iter().chain(base.iter()).copied().collect();

    let analyze = |values: Vec<f64>| {
        let table = Table::new(vec![Column::new(
            "amount",
            values.into_iter().map(CellValue::from).collect(),
        )])
        .unwrap();
        Analyzer::new()
            .analyze(&table)
            .unwrap()
            .benford_metrics_for("amount")
            .cloned()
            .unwrap()
    };

    let single = analyze(base);
    let double = analyze(doubled);

    assert!((double.mad - single.mad).abs() < 1e-12);
    assert!((double.chi_square - 2.0 * single.chi_square).abs() < 1e-6);
}

#[test]
fn test_aggregate_combines_numeric_columns() {
    let debit: Vec<CellValue> = benford_amounts(400).into_iter().map(CellValue::from).collect();
    let credit: Vec<CellValue> = benford_amounts(400).into_iter().map(|v| CellValue::from(-v)).collect();
    let table = Table::new(vec![Column::new("debit", debit), Column::new("credit", credit)]).unwrap();

    let result = Analyzer::new().analyze(&table).unwrap();
    let names: Vec<&str> = result.benford_metrics.iter().map(|m| m.column.as_str()).collect();
    assert_eq!(names, vec!["debit", "credit", AGGREGATE_LABEL]);

    let aggregate = result.aggregate_metrics().unwrap();
    assert_eq!(aggregate.sample_size, 800);
    let debit = result.benford_metrics_for("debit").unwrap();
    assert!((aggregate.mad - debit.mad).abs() < 1e-12);
}

#[test]
fn test_min_sample_size_is_configurable() {
    let table = Table::new(vec![Column::new(
        "amount",
        benford_amounts(20).into_iter().map(CellValue::from).collect(),
    )])
    .unwrap();

    assert!(Analyzer::new().analyze(&table).unwrap().benford_metrics.is_empty());

    let config = AnalysisConfig {
        min_sample_size: 10,
        ..AnalysisConfig::default()
    };
    let result = Analyzer::with_config(config).analyze(&table).unwrap();
    assert!(result.benford_metrics_for("amount").is_some());
}

// =============================================================================
// File Pipeline Tests
// =============================================================================

#[test]
fn test_file_to_reports() {
    let mut content = String::from("entry_id\tposted\tamount\taccount\tmemo\n");
    for (i, amount) in benford_amounts(120).iter().enumerate() {
        let memo = if i % 10 == 0 { "" } else { "accrual" };
        let account = if i == 5 { "SUSPENSE" } else { "4000" };
        content.push_str(&format!(
            "JE-{:04}\t2024-02-{:02}\t\"{:.2}\"\t{}\t{}\n",
            i,
            (i % 28) + 1,
            amount,
            account,
            memo
        ));
    }
    let file = create_test_file(&content);

    let (result, source) = Analyzer::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    assert_eq!(source.format, "tsv");
    assert!(source.hash.starts_with("sha256:"));
    assert_eq!(result.row_count, 120);
    assert_eq!(result.column("entry_id").unwrap().kind, ColumnKind::Text);
    assert_eq!(result.column("posted").unwrap().kind, ColumnKind::Date);
    assert_eq!(result.column("amount").unwrap().kind, ColumnKind::Numeric);
    assert_eq!(result.column("memo").unwrap().null_count, 12);

    let account = result.column("account").unwrap();
    assert!(account.ambiguous);
    assert_eq!(result.ambiguities[0].column, "account");

    let out = tempfile::tempdir().unwrap();
    let written = ReportWriter::new(out.path()).write_all(&result).unwrap();
    assert_eq!(written.len(), 7);

    let md = std::fs::read_to_string(out.path().join("summary.md")).unwrap();
    assert!(md.contains("| posted |"));
    assert!(md.contains("| memo | 12 |"));
    assert!(md.contains("## Type Ambiguities"));
}

#[test]
fn test_overflowing_amount_is_not_counted_missing() {
    let file = create_test_file("amount\n1e400\n5\n");
    let (result, _) = Analyzer::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    let amount = result.column("amount").unwrap();
    assert_eq!(amount.kind, ColumnKind::Numeric);
    assert_eq!(amount.null_count, 0);
    assert_eq!(amount.non_null_count, 2);
    assert_eq!(
        amount.range,
        Some(ledgerscope::ValueRange::Numeric { min: 5.0, max: 5.0 })
    );

    // Both passes agree on the finite values.
    let summary = result.numeric_summary("amount").unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.max, Some(5.0));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Analyzer::new()
        .analyze_file("/definitely/not/here.csv")
        .unwrap_err();
    assert!(matches!(err, LedgerError::Io { .. }));
}
