//! Human-readable Markdown summary.

use crate::analysis::AnalysisResult;

use super::TOP_MISSING_LIMIT;

/// Render the Markdown summary of an analysis.
pub fn markdown_summary(result: &AnalysisResult) -> String {
    let mut lines: Vec<String> = vec![
        "# GL Summary".to_string(),
        String::new(),
        format!("* Rows: {}", result.row_count),
        format!("* Columns: {}", result.column_count),
        String::new(),
        "## Date Ranges".to_string(),
    ];

    if result.date_ranges.is_empty() {
        lines.push("No date columns detected.".to_string());
    } else {
        lines.push("| Column | Min | Max |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for range in &result.date_ranges {
            lines.push(format!("| {} | {} | {} |", range.column, range.min, range.max));
        }
    }

    lines.extend(["".to_string(), "## Top Missing Columns".to_string(), "".to_string()]);
    // Top columns by null count, zero counts included.
    let missing = result.missing_ranking(TOP_MISSING_LIMIT);
    if missing.is_empty() {
        lines.push("No missing values detected.".to_string());
    } else {
        lines.push("| Column | Missing Values |".to_string());
        lines.push("| --- | --- |".to_string());
        for (column, count) in missing {
            lines.push(format!("| {} | {} |", column, count));
        }
    }

    lines.extend(["".to_string(), "## Benford's Law".to_string(), "".to_string()]);
    if result.benford_metrics.is_empty() {
        lines.push("No numeric columns qualified for Benford analysis.".to_string());
    } else {
        lines.push("| Column | Sample Size | MAD | Chi-Square (df=8) |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for m in &result.benford_metrics {
            let label = if m.is_aggregate() {
                "All numeric columns"
            } else {
                m.column.as_str()
            };
            lines.push(format!(
                "| {} | {} | {:.4} | {:.2} |",
                label, m.sample_size, m.mad, m.chi_square
            ));
        }
    }

    if !result.exclusions.is_empty() {
        lines.push(String::new());
        lines.push("Excluded from Benford analysis:".to_string());
        for exclusion in &result.exclusions {
            lines.push(format!("* {}: {}", exclusion.column, exclusion.reason));
        }
    }

    if !result.ambiguities.is_empty() {
        lines.extend(["".to_string(), "## Type Ambiguities".to_string(), "".to_string()]);
        for a in &result.ambiguities {
            lines.push(format!(
                "* {}: treated as {} ({} numeric, {} text, {} date values)",
                a.column,
                a.resolved_kind.label(),
                a.counts.numeric,
                a.counts.text,
                a.counts.date
            ));
        }
    }

    lines.join("\n")
}
