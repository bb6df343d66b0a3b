//! Calendar-day arithmetic and the wide-table date-key convention.

use chrono::{Datelike, NaiveDate};

use crate::error::{CoronaError, Result};

/// Whole-day difference `later - earlier`.
///
/// # Errors
///
/// Returns `InvalidDateOrder` when `later` precedes `earlier`.
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> Result<i64> {
    let days = (later - earlier).num_days();
    if days < 0 {
        return Err(CoronaError::InvalidDateOrder { later, earlier });
    }
    Ok(days)
}

/// Render a date as the un-padded `M/D/YY` key used by the wide-table
/// column headers. This format is a hard external contract: any deviation
/// breaks column lookup.
pub fn format_key(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Parse a wide-table column header back into a date. Accepts both padded
/// and un-padded month/day components.
pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%m/%d/%y").ok()
}
