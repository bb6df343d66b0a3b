//! Per-city partitioning of the line list.
//!
//! The death-date null/non-null split is a complete partition: every record
//! lands in exactly one of the case or death sub-populations. Both are
//! grouped by notification date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use corona_model::{DerivedSeries, LineListRecord, SeriesPoint};

/// Whether a per-city series keeps only observed dates or fills the whole
/// date range with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapFill {
    /// Only dates with at least one record appear.
    #[default]
    Sparse,
    /// Every day between the first and last observed date appears, missing
    /// days counted as zero.
    Dense,
}

#[derive(Debug, Clone, Copy)]
pub struct CityAggregator<'a> {
    records: &'a [LineListRecord],
}

impl<'a> CityAggregator<'a> {
    pub fn new(records: &'a [LineListRecord]) -> Self {
        Self { records }
    }

    /// Distinct city values in first-encountered order.
    pub fn cities(&self) -> Vec<String> {
        let mut seen = BTreeMap::new();
        let mut cities = Vec::new();
        for record in self.records {
            if seen.insert(record.city.clone(), ()).is_none() {
                cities.push(record.city.clone());
            }
        }
        cities
    }

    /// Daily count of non-fatal cases notified in `city`.
    pub fn cases_per_day(&self, city: &str, gap_fill: GapFill) -> DerivedSeries {
        self.per_day(city, false, gap_fill)
    }

    /// Daily count of fatal cases notified in `city`.
    pub fn deaths_per_day(&self, city: &str, gap_fill: GapFill) -> DerivedSeries {
        self.per_day(city, true, gap_fill)
    }

    /// Running total of non-fatal cases in `city`, in date order.
    pub fn cases_progression(&self, city: &str, gap_fill: GapFill) -> DerivedSeries {
        cumulative(&self.cases_per_day(city, gap_fill))
    }

    /// Running total of fatal cases in `city`, in date order.
    pub fn deaths_progression(&self, city: &str, gap_fill: GapFill) -> DerivedSeries {
        cumulative(&self.deaths_per_day(city, gap_fill))
    }

    fn per_day(&self, city: &str, deaths: bool, gap_fill: GapFill) -> DerivedSeries {
        let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for record in self.records {
            if record.city != city || record.is_death() != deaths {
                continue;
            }
            *counts.entry(record.notified).or_insert(0) += 1;
        }
        let series = DerivedSeries::new(
            counts
                .into_iter()
                .map(|(date, count)| SeriesPoint { date, count })
                .collect(),
        );
        match gap_fill {
            GapFill::Sparse => series,
            GapFill::Dense => fill_gaps(&series),
        }
    }
}

/// Expand a date-sorted series to a dense daily axis, inserting zero counts
/// for days with no records.
pub fn fill_gaps(series: &DerivedSeries) -> DerivedSeries {
    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        return series.clone();
    };
    let mut points = Vec::new();
    let mut lookup = series.points.iter().peekable();
    let mut day = first.date;
    while day <= last.date {
        let count = match lookup.peek() {
            Some(point) if point.date == day => lookup.next().map_or(0, |point| point.count),
            _ => 0,
        };
        points.push(SeriesPoint { date: day, count });
        day += Duration::days(1);
    }
    DerivedSeries::new(points)
}

fn cumulative(series: &DerivedSeries) -> DerivedSeries {
    let mut running = 0i64;
    DerivedSeries::new(
        series
            .points
            .iter()
            .map(|point| {
                running += point.count;
                SeriesPoint {
                    date: point.date,
                    count: running,
                }
            })
            .collect(),
    )
}
