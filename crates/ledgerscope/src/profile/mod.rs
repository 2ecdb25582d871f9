//! Column profiling.

mod profiler;
mod types;

pub use profiler::TableProfiler;
pub use types::{
    null_percentage, ColumnProfile, DateRange, TableProfile, TypeAmbiguity, ValueRange,
};
