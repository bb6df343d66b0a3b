//! Sinks persist named tables. The derivation core never owns file paths:
//! a table's name is a relative, extension-free identifier and the sink
//! decides the final location.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use corona_model::OutputTable;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;

pub trait Sink {
    /// Persist one table. Each table is written exactly once per run.
    fn write_table(&mut self, table: &OutputTable) -> Result<()>;
}

/// Writes each table as `<root>/<name>.csv`, creating intermediate
/// directories for nested names like `cities/cases/per_day/bogota`.
pub struct CsvSink {
    root: PathBuf,
}

impl CsvSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Sink for CsvSink {
    fn write_table(&mut self, table: &OutputTable) -> Result<()> {
        let path = self.root.join(format!("{}.csv", table.name));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = table.rows.len(), "table written");
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: BTreeMap<String, OutputTable>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&OutputTable> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Sink for MemorySink {
    fn write_table(&mut self, table: &OutputTable) -> Result<()> {
        self.tables.insert(table.name.clone(), table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> OutputTable {
        let mut table = OutputTable::new(
            "cities/cases/per_day/bogota d.c.",
            vec!["date".to_string(), "cases".to_string()],
        );
        table.push_row(vec!["2020-03-06".to_string(), "1".to_string()]);
        table
    }

    #[test]
    fn csv_sink_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let mut sink = CsvSink::new(dir.path());
        sink.write_table(&sample_table()).unwrap();
        let written = dir.path().join("cities/cases/per_day/bogota d.c..csv");
        let contents = std::fs::read_to_string(written).unwrap();
        assert_eq!(contents, "date,cases\n2020-03-06,1\n");
    }

    #[test]
    fn memory_sink_keeps_tables_by_name() {
        let mut sink = MemorySink::new();
        sink.write_table(&sample_table()).unwrap();
        assert_eq!(sink.len(), 1);
        let stored = sink.get("cities/cases/per_day/bogota d.c.").unwrap();
        assert_eq!(stored.record_count(), 1);
    }
}
