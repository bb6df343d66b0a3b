use std::path::PathBuf;

/// Outcome of one derivation in a run.
#[derive(Debug, Clone)]
pub struct DerivationSummary {
    pub name: String,
    /// Total rows across the tables this derivation produced.
    pub records: usize,
    /// Number of tables written (per-city derivations emit one per city).
    pub tables: usize,
    pub error: Option<String>,
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Where tables were written; `None` for a dry run.
    pub output_dir: Option<PathBuf>,
    pub derivations: Vec<DerivationSummary>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.derivations
            .iter()
            .any(|summary| summary.error.is_some())
    }
}
