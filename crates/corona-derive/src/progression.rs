//! Multi-country outbreak alignment.
//!
//! Each country's cumulative series is anchored to that country's own
//! first-case or first-death date and re-indexed to "days since outbreak
//! start", making the columns comparable at the same row index despite
//! differing calendar start dates.

use chrono::NaiveDate;
use tracing::debug;

use corona_ingest::WideTable;
use corona_model::dates::days_between;
use corona_model::{AlignedTable, CountryProfile, DateSelector, Result, SeriesMode};

use crate::series::country_series;

/// Extra days granted beyond the reference country's span, so countries
/// whose outbreak started earlier can run past it while data exists.
pub const EXTRA_DAYS: usize = 14;

/// Shared day budget: days from the reference country's anchor date to the
/// table's last column, plus two weeks. Computed once and applied to every
/// country so all columns have the same length.
pub fn day_budget(table: &WideTable, reference: NaiveDate) -> Result<usize> {
    let span = days_between(table.last_available_date(), reference)?;
    Ok(span as usize + EXTRA_DAYS)
}

/// Align every profiled country's cumulative series on its own outbreak
/// start. Series that run out of table columns before the budget are
/// right-padded with the missing marker, never with zero.
pub fn countries_progression(
    table: &WideTable,
    profiles: &[CountryProfile],
    selector: DateSelector,
    reference: NaiveDate,
) -> Result<AlignedTable> {
    let budget = day_budget(table, reference)?;
    let mut aligned = AlignedTable::new(budget);
    for profile in profiles {
        let series = country_series(
            table,
            &profile.name,
            profile.start_date(selector),
            budget,
            SeriesMode::Cumulative,
        )?;
        debug!(
            country = %profile.name,
            start = %profile.start_date(selector),
            emitted = series.len(),
            budget,
            "country aligned"
        );
        let column = series.points.iter().map(|point| Some(point.count)).collect();
        aligned.push_column(profile.name.clone(), column);
    }
    Ok(aligned)
}
