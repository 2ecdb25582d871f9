//! Table model and delimited-text loading.

mod cell;
mod parser;
mod source;

pub use cell::{infer_kind, CellValue, ColumnKind, KindInference, VariantCounts};
pub use parser::{is_null_value, parse_cell, Parser, ParserConfig};
pub use source::{Column, SourceMetadata, Table};
