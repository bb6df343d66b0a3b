//! Subcommand entry points.

use anyhow::Result;
use tracing::info;

use corona_derive::GapFill;
use corona_report::{CsvSink, MemorySink, Sink};

use crate::cli::{GapFillArg, RunArgs};
use crate::pipeline::{DERIVATIONS, InputPaths, RunOptions, load_session, run};
use crate::types::RunResult;

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let cases = args.input_dir.join(&args.cases_file);
    let deaths = args.input_dir.join(&args.deaths_file);
    let line_list = args.input_dir.join(&args.line_list_file);
    let paths = InputPaths {
        cases: &cases,
        deaths: &deaths,
        line_list: &line_list,
    };
    let session = load_session(&paths)?;
    let options = RunOptions {
        gap_fill: match args.gap_fill {
            GapFillArg::Sparse => GapFill::Sparse,
            GapFillArg::Dense => GapFill::Dense,
        },
    };

    if args.dry_run {
        let mut sink = MemorySink::new();
        let result = run(&session, &mut sink, &options)?;
        info!(tables = sink.len(), "dry run, nothing written");
        return Ok(result);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("output"));
    let mut sink = CsvSink::new(&output_dir);
    let mut result = run(&session, &mut sink, &options)?;
    result.output_dir = Some(output_dir);
    Ok(result)
}

pub fn run_derivations() -> Result<()> {
    for derivation in DERIVATIONS {
        println!("{}", derivation.name);
    }
    Ok(())
}
