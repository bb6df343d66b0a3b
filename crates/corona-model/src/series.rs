use chrono::NaiveDate;

/// Flavor of a derived per-day series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SeriesMode {
    /// Raw running totals as reported.
    Cumulative,
    /// First differences; the value before the series start is taken as 0,
    /// so the first delta equals the first cumulative value.
    Delta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub count: i64,
}

/// Ordered sequence of per-day counts. Produced fresh on every derivation
/// and never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DerivedSeries {
    pub points: Vec<SeriesPoint>,
}

impl DerivedSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn counts(&self) -> Vec<i64> {
        self.points.iter().map(|point| point.count).collect()
    }
}

/// Multi-country table re-indexed to "days since that country's own
/// outbreak start". Rows are the 1-based day index `1..=day_budget`;
/// columns are countries in registry order. `None` cells mean "no data
/// yet", which is distinct from a reported zero.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlignedTable {
    day_budget: usize,
    countries: Vec<String>,
    columns: Vec<Vec<Option<i64>>>,
}

impl AlignedTable {
    pub fn new(day_budget: usize) -> Self {
        Self {
            day_budget,
            countries: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Append a country column, right-padding short series with `None`.
    pub fn push_column(&mut self, country: String, mut column: Vec<Option<i64>>) {
        column.truncate(self.day_budget);
        column.resize(self.day_budget, None);
        self.countries.push(country);
        self.columns.push(column);
    }

    pub fn day_budget(&self) -> usize {
        self.day_budget
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn column(&self, country: &str) -> Option<&[Option<i64>]> {
        let index = self.countries.iter().position(|name| name == country)?;
        Some(&self.columns[index])
    }

    /// Cell at a 1-based day index.
    pub fn cell(&self, day: usize, column: usize) -> Option<i64> {
        self.columns[column][day - 1]
    }
}
