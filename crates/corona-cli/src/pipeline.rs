//! Declarative pipeline: one parameterized run over a fixed list of
//! (derivation, output name) pairs.
//!
//! Stages:
//! 1. **Load**: read the two wide tables and the line list into a session
//! 2. **Derive**: run each registered derivation against the session
//! 3. **Write**: hand every produced table to the sink exactly once

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use corona_derive::{GapFill, Session};
use corona_ingest::{WideTable, read_line_list};
use corona_model::{CoronaError, OutputTable};
use corona_report::{DateStyle, Sink, aligned_table, ranked_table, series_table};

use crate::types::{DerivationSummary, RunResult};

/// One registered derivation.
#[derive(Debug, Clone, Copy)]
pub struct Derivation {
    pub name: &'static str,
    pub kind: DerivationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationKind {
    CasesPerDay,
    DeathsPerDay,
    TotalCasesPerDay,
    TotalDeathsPerDay,
    CasesPerCity,
    CasesPerAge,
    Origins,
    CountriesCasesProgression,
    CountriesDeathsProgression,
    CityCasesPerDay,
    CityCasesProgression,
    CityDeathsPerDay,
    CityDeathsProgression,
}

/// The full fixed derivation set, in output order.
pub const DERIVATIONS: &[Derivation] = &[
    Derivation {
        name: "cases_per_day",
        kind: DerivationKind::CasesPerDay,
    },
    Derivation {
        name: "deaths_per_day",
        kind: DerivationKind::DeathsPerDay,
    },
    Derivation {
        name: "cases_per_city",
        kind: DerivationKind::CasesPerCity,
    },
    Derivation {
        name: "cases_per_age",
        kind: DerivationKind::CasesPerAge,
    },
    Derivation {
        name: "total_cases_per_day",
        kind: DerivationKind::TotalCasesPerDay,
    },
    Derivation {
        name: "total_deaths_per_day",
        kind: DerivationKind::TotalDeathsPerDay,
    },
    Derivation {
        name: "origins",
        kind: DerivationKind::Origins,
    },
    Derivation {
        name: "countries_progression",
        kind: DerivationKind::CountriesCasesProgression,
    },
    Derivation {
        name: "countries_death_progression",
        kind: DerivationKind::CountriesDeathsProgression,
    },
    Derivation {
        name: "cities_cases_per_day",
        kind: DerivationKind::CityCasesPerDay,
    },
    Derivation {
        name: "cities_cases_progression",
        kind: DerivationKind::CityCasesProgression,
    },
    Derivation {
        name: "cities_deaths_per_day",
        kind: DerivationKind::CityDeathsPerDay,
    },
    Derivation {
        name: "cities_deaths_progression",
        kind: DerivationKind::CityDeathsProgression,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub gap_fill: GapFill,
}

/// Input file locations for one run.
pub struct InputPaths<'a> {
    pub cases: &'a Path,
    pub deaths: &'a Path,
    pub line_list: &'a Path,
}

/// Load the three inputs into a session.
pub fn load_session(paths: &InputPaths<'_>) -> Result<Session> {
    let load_span = info_span!("load");
    let _guard = load_span.enter();
    let start = Instant::now();
    let cases = WideTable::from_path(paths.cases)
        .with_context(|| format!("read cases table {}", paths.cases.display()))?;
    let deaths = WideTable::from_path(paths.deaths)
        .with_context(|| format!("read deaths table {}", paths.deaths.display()))?;
    let line_list = read_line_list(paths.line_list)
        .with_context(|| format!("read line list {}", paths.line_list.display()))?;
    info!(
        case_rows = cases.row_count(),
        death_rows = deaths.row_count(),
        line_list_records = line_list.len(),
        duration_ms = start.elapsed().as_millis(),
        "inputs loaded"
    );
    Ok(Session::new(cases, deaths, line_list))
}

/// Run every registered derivation and hand the produced tables to the
/// sink.
///
/// A `CountryNotFound` failure aborts only the affected derivation and is
/// recorded in its summary; any other derivation failure (for example a
/// malformed cell) aborts the whole run with no further output.
pub fn run(session: &Session, sink: &mut dyn Sink, options: &RunOptions) -> Result<RunResult> {
    let run_span = info_span!("run");
    let _guard = run_span.enter();
    let run_start = Instant::now();
    let mut summaries = Vec::with_capacity(DERIVATIONS.len());

    for derivation in DERIVATIONS {
        let span = info_span!("derivation", name = derivation.name);
        let _span_guard = span.enter();
        let start = Instant::now();

        let tables = match execute(session, derivation.kind, options) {
            Ok(tables) => tables,
            Err(error @ CoronaError::CountryNotFound { .. }) => {
                debug!(name = derivation.name, %error, "derivation skipped");
                summaries.push(DerivationSummary {
                    name: derivation.name.to_string(),
                    records: 0,
                    tables: 0,
                    error: Some(error.to_string()),
                });
                continue;
            }
            Err(error) => {
                return Err(error).with_context(|| format!("derive {}", derivation.name));
            }
        };

        let records: usize = tables.iter().map(OutputTable::record_count).sum();
        for table in &tables {
            sink.write_table(table)
                .with_context(|| format!("write {}", table.name))?;
        }
        debug!(
            name = derivation.name,
            tables = tables.len(),
            records,
            duration_ms = start.elapsed().as_millis(),
            "derivation complete"
        );
        summaries.push(DerivationSummary {
            name: derivation.name.to_string(),
            records,
            tables: tables.len(),
            error: None,
        });
    }

    info!(
        derivations = summaries.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        output_dir: None,
        derivations: summaries,
    })
}

fn execute(
    session: &Session,
    kind: DerivationKind,
    options: &RunOptions,
) -> corona_model::Result<Vec<OutputTable>> {
    let tables = match kind {
        DerivationKind::CasesPerDay => vec![series_table(
            "cases_per_day",
            "cases",
            &session.cases_per_day()?,
            DateStyle::CompactKey,
        )],
        DerivationKind::DeathsPerDay => vec![series_table(
            "deaths_per_day",
            "deaths",
            &session.deaths_per_day()?,
            DateStyle::CompactKey,
        )],
        DerivationKind::TotalCasesPerDay => vec![series_table(
            "total_cases_per_day",
            "cases",
            &session.total_cases_per_day()?,
            DateStyle::CompactKey,
        )],
        DerivationKind::TotalDeathsPerDay => vec![series_table(
            "total_deaths_per_day",
            "deaths",
            &session.total_deaths_per_day()?,
            DateStyle::CompactKey,
        )],
        DerivationKind::CasesPerCity => vec![ranked_table(
            "cases_per_city",
            "city",
            "cases",
            &session.cases_per_city(),
        )],
        DerivationKind::CasesPerAge => vec![ranked_table(
            "cases_per_age",
            "age group",
            "cases",
            &session.cases_per_age(),
        )],
        DerivationKind::Origins => {
            let breakdown = session.origins();
            vec![
                breakdown.definite.to_output_table("cases_per_origin"),
                breakdown.possible.to_output_table("possible_origins_cases"),
            ]
        }
        DerivationKind::CountriesCasesProgression => vec![aligned_table(
            "countries_progression",
            &session.countries_cases_progression()?,
        )],
        DerivationKind::CountriesDeathsProgression => vec![aligned_table(
            "countries_death_progression",
            &session.countries_deaths_progression()?,
        )],
        DerivationKind::CityCasesPerDay => {
            city_tables("cities/cases/per_day", "cases", session, options, |a, c| {
                a.cases_per_day(c, options.gap_fill)
            })
        }
        DerivationKind::CityCasesProgression => {
            city_tables("cities/cases/total", "cases", session, options, |a, c| {
                a.cases_progression(c, options.gap_fill)
            })
        }
        DerivationKind::CityDeathsPerDay => {
            city_tables("cities/deaths/per_day", "deaths", session, options, |a, c| {
                a.deaths_per_day(c, options.gap_fill)
            })
        }
        DerivationKind::CityDeathsProgression => {
            city_tables("cities/deaths/total", "deaths", session, options, |a, c| {
                a.deaths_progression(c, options.gap_fill)
            })
        }
    };
    Ok(tables)
}

fn city_tables(
    prefix: &str,
    value_column: &str,
    session: &Session,
    _options: &RunOptions,
    derive: impl Fn(corona_derive::CityAggregator<'_>, &str) -> corona_model::DerivedSeries,
) -> Vec<OutputTable> {
    let aggregator = session.city_aggregator();
    let mut tables = Vec::new();
    for city in aggregator.cities() {
        let series = derive(aggregator, &city);
        let name = format!("{prefix}/{}", city.to_lowercase());
        tables.push(series_table(&name, value_column, &series, DateStyle::Iso));
    }
    tables
}
