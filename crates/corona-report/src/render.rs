//! Conversion of derived values into named output tables.

use corona_model::dates::format_key;
use corona_model::{AlignedTable, DerivedSeries, OutputTable};

/// How a series renders its date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// The wide-table `M/D/YY` key, used by the country-level tables.
    CompactKey,
    /// ISO `YYYY-MM-DD`, used by the per-city tables.
    Iso,
}

/// Render a per-day series as a two-column `date`/<value> table.
pub fn series_table(
    name: &str,
    value_column: &str,
    series: &DerivedSeries,
    date_style: DateStyle,
) -> OutputTable {
    let mut table = OutputTable::new(
        name,
        vec!["date".to_string(), value_column.to_string()],
    );
    for point in &series.points {
        let date = match date_style {
            DateStyle::CompactKey => format_key(point.date),
            DateStyle::Iso => point.date.to_string(),
        };
        table.push_row(vec![date, point.count.to_string()]);
    }
    table
}

/// Render an aligned table as `day` plus one column per country. Missing
/// markers become empty cells, never zeros.
pub fn aligned_table(name: &str, aligned: &AlignedTable) -> OutputTable {
    let mut columns = vec!["day".to_string()];
    columns.extend(aligned.countries().iter().cloned());
    let mut table = OutputTable::new(name, columns);
    for day in 1..=aligned.day_budget() {
        let mut row = vec![day.to_string()];
        for column in 0..aligned.countries().len() {
            row.push(
                aligned
                    .cell(day, column)
                    .map(|count| count.to_string())
                    .unwrap_or_default(),
            );
        }
        table.push_row(row);
    }
    table
}

/// Render a ranked `(key, count)` listing.
pub fn ranked_table<K: ToString>(
    name: &str,
    key_column: &str,
    value_column: &str,
    ranked: &[(K, u64)],
) -> OutputTable {
    let mut table = OutputTable::new(
        name,
        vec![key_column.to_string(), value_column.to_string()],
    );
    for (key, count) in ranked {
        table.push_row(vec![key.to_string(), count.to_string()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use corona_model::SeriesPoint;

    fn series() -> DerivedSeries {
        DerivedSeries::new(vec![
            SeriesPoint {
                date: NaiveDate::from_ymd_opt(2020, 3, 6).unwrap(),
                count: 1,
            },
            SeriesPoint {
                date: NaiveDate::from_ymd_opt(2020, 3, 7).unwrap(),
                count: 3,
            },
        ])
    }

    #[test]
    fn series_table_uses_the_requested_date_style() {
        let compact = series_table("cases_per_day", "cases", &series(), DateStyle::CompactKey);
        assert_eq!(compact.rows[0], vec!["3/6/20", "1"]);
        let iso = series_table("cities/x", "cases", &series(), DateStyle::Iso);
        assert_eq!(iso.rows[0], vec!["2020-03-06", "1"]);
        assert_eq!(iso.columns, vec!["date", "cases"]);
    }

    #[test]
    fn aligned_table_renders_missing_as_empty() {
        let mut aligned = AlignedTable::new(3);
        aligned.push_column("Colombia".to_string(), vec![Some(1), Some(3)]);
        let table = aligned_table("countries_progression", &aligned);
        assert_eq!(table.columns, vec!["day", "Colombia"]);
        assert_eq!(table.rows[0], vec!["1", "1"]);
        assert_eq!(table.rows[2], vec!["3", ""]);
    }
}
