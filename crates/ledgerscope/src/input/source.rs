//! In-memory table and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

use super::cell::{infer_kind, CellValue, ColumnKind, KindInference};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A named column of typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Kind reported by the loader, used only when no cell carries evidence.
    pub declared_kind: Option<ColumnKind>,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            declared_kind: None,
            cells,
        }
    }

    /// Attach a loader-declared kind.
    pub fn with_declared_kind(mut self, kind: ColumnKind) -> Self {
        self.declared_kind = Some(kind);
        self
    }

    /// Infer this column's kind from its cells.
    pub fn infer_kind(&self) -> KindInference {
        infer_kind(&self.cells, self.declared_kind)
    }

    /// Non-null numeric values, in row order.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(CellValue::as_f64)
    }
}

/// Column-major table of typed cells. All columns have the same length.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);

        if let Some(bad) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(LedgerError::RaggedColumns {
                column: bad.name.clone(),
                expected: row_count,
                found: bad.cells.len(),
            });
        }

        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
