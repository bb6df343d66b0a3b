//! Per-day derivation over a wide cumulative table.

use chrono::{Duration, NaiveDate};
use tracing::trace;

use corona_ingest::WideTable;
use corona_model::dates::format_key;
use corona_model::{CoronaError, DerivedSeries, Result, SeriesMode, SeriesPoint};

/// Extract a country's series from a wide cumulative table.
///
/// Walks `day_count` consecutive days from `start`. A day with no matching
/// column ends the series early (the table ran out of data); the shorter
/// series is returned as-is. In delta mode the value immediately before
/// `start` is taken as 0, and negative deltas from upstream corrections are
/// preserved, not clamped.
///
/// # Errors
///
/// `CountryNotFound` when no row matches `country` exactly;
/// `MalformedCell` when a visited cell is not an integer.
pub fn country_series(
    table: &WideTable,
    country: &str,
    start: NaiveDate,
    day_count: usize,
    mode: SeriesMode,
) -> Result<DerivedSeries> {
    let row = table
        .find_country(country)
        .ok_or_else(|| CoronaError::CountryNotFound {
            country: country.to_string(),
        })?;
    let mut points = Vec::with_capacity(day_count);
    let mut previous = 0i64;
    for offset in 0..day_count {
        let day = start + Duration::days(offset as i64);
        let Some(raw) = table.value(row, day) else {
            // End of available data, not an error.
            trace!(country, day = %day, emitted = points.len(), "series ended early");
            break;
        };
        let current: i64 = raw
            .trim()
            .parse()
            .map_err(|_| CoronaError::MalformedCell {
                country: country.to_string(),
                column: format_key(day),
                value: raw.to_string(),
            })?;
        let count = match mode {
            SeriesMode::Cumulative => current,
            SeriesMode::Delta => current - previous,
        };
        previous = current;
        points.push(SeriesPoint { date: day, count });
    }
    Ok(DerivedSeries::new(points))
}
