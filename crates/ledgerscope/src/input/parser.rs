//! Delimited-text loader with delimiter detection and cell classification.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::cell::CellValue;
use super::source::{Column, SourceMetadata, Table};
use crate::error::{LedgerError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Amounts as they appear in ledger exports: optional currency sign,
// thousands separators, and accounting-style parentheses for negatives.
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<open>\()?\s*(?P<sign>[-+])?\s*[$€£¥]?\s*(?P<body>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)\s*(?P<close>\))?$")
        .expect("amount pattern is valid")
});

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads delimited text files into a typed [`Table`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| LedgerError::io(path, e))?;
        let size_bytes = file.metadata().map_err(|e| LedgerError::io(path, e))?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| LedgerError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            format = %format,
            "loaded table"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows: Vec<csv::StringRecord> = Vec::new();
        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            rows.push(result?);
        }

        let headers = if self.config.has_header {
            headers
        } else {
            match rows.first() {
                Some(first) => (0..first.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                None => Vec::new(),
            }
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LedgerError::EmptyData("No columns found".to_string()));
        }

        let width = headers.len();
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); width];

        // Short rows are padded with nulls, long rows truncated to the header width.
        for record in &rows {
            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(record.get(idx).map(parse_cell).unwrap_or(CellValue::Null));
            }
        }

        let columns = headers
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();

        Table::new(columns)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a raw value represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Classify a raw text value into a typed cell.
pub fn parse_cell(raw: &str) -> CellValue {
    if is_null_value(raw) {
        return CellValue::Null;
    }

    let trimmed = raw.trim();

    if let Some(value) = parse_amount(trimmed) {
        // Overflowing amounts stay numeric; later passes skip non-finite values.
        if !value.is_finite() {
            warn!(value = trimmed, "amount overflows f64");
        }
        return CellValue::Numeric(value);
    }

    if let Some(date) = parse_date(trimmed) {
        return CellValue::Date(date);
    }

    CellValue::Text(trimmed.to_string())
}

/// Parse a number, accepting ledger-style amount formatting.
fn parse_amount(value: &str) -> Option<f64> {
    if let Ok(v) = value.parse::<f64>() {
        // Rejects words like "inf" or "nan" that f64 parsing accepts.
        if value.bytes().any(|b| b.is_ascii_digit()) {
            return Some(v);
        }
        return None;
    }

    let caps = AMOUNT_PATTERN.captures(value)?;
    let parenthesized = match (caps.name("open"), caps.name("close")) {
        (Some(_), Some(_)) => true,
        (None, None) => false,
        _ => return None,
    };

    let body: String = caps["body"].chars().filter(|&c| c != ',').collect();
    let magnitude: f64 = body.parse().ok()?;
    let negative = parenthesized || caps.name("sign").is_some_and(|s| s.as_str() == "-");

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LedgerError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance =
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64;

        // Higher count with lower variance wins; tabs get a small bonus since
        // they rarely occur inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
