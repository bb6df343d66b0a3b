pub mod render;
pub mod sink;

pub use render::{DateStyle, aligned_table, ranked_table, series_table};
pub use sink::{CsvSink, MemorySink, Result, Sink, SinkError};
