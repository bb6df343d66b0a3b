//! Derivation engine tests over in-memory wide tables.

use chrono::{Duration, NaiveDate};
use proptest::prelude::{ProptestConfig, any, proptest};

use corona_derive::{country_series, countries_progression, day_budget};
use corona_ingest::WideTable;
use corona_model::dates::format_key;
use corona_model::{CoronaError, CountryProfile, DateSelector, SeriesMode};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Build a single-country wide table whose date columns start at `start`.
fn wide_table(country: &str, start: NaiveDate, cells: &[&str]) -> WideTable {
    let mut headers = vec![
        "Province/State".to_string(),
        "Country/Region".to_string(),
        "Lat".to_string(),
        "Long".to_string(),
    ];
    let mut row = vec![
        String::new(),
        country.to_string(),
        "0.0".to_string(),
        "0.0".to_string(),
    ];
    for (offset, cell) in cells.iter().enumerate() {
        headers.push(format_key(start + Duration::days(offset as i64)));
        row.push((*cell).to_string());
    }
    WideTable::from_parts(headers, vec![row]).expect("valid wide table")
}

fn profile(name: &str, first_case: NaiveDate) -> CountryProfile {
    CountryProfile {
        name: name.to_string(),
        first_case,
        first_death: first_case,
    }
}

#[test]
fn colombia_scenario_cumulative_and_delta() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["1", "3", "3"]);
    let cumulative =
        country_series(&table, "Colombia", start, 3, SeriesMode::Cumulative).unwrap();
    assert_eq!(cumulative.counts(), vec![1, 3, 3]);
    let delta = country_series(&table, "Colombia", start, 3, SeriesMode::Delta).unwrap();
    assert_eq!(delta.counts(), vec![1, 2, 0]);
}

#[test]
fn series_stops_at_end_of_data() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["1", "3", "3"]);
    let series = country_series(&table, "Colombia", start, 10, SeriesMode::Cumulative).unwrap();
    assert_eq!(series.len(), 3);
}

#[test]
fn negative_deltas_are_preserved() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["5", "3", "4"]);
    let delta = country_series(&table, "Colombia", start, 3, SeriesMode::Delta).unwrap();
    assert_eq!(delta.counts(), vec![5, -2, 1]);
}

#[test]
fn unknown_country_is_a_distinct_failure() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["1"]);
    let error = country_series(&table, "France", start, 1, SeriesMode::Cumulative).unwrap_err();
    assert!(matches!(error, CoronaError::CountryNotFound { .. }));
}

#[test]
fn non_numeric_cell_is_fatal_not_end_of_data() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["1", "n/a", "3"]);
    let error = country_series(&table, "Colombia", start, 3, SeriesMode::Cumulative).unwrap_err();
    assert!(matches!(error, CoronaError::MalformedCell { .. }));
}

#[test]
fn derivations_are_idempotent() {
    let start = date(2020, 3, 6);
    let table = wide_table("Colombia", start, &["1", "3", "7"]);
    let first = country_series(&table, "Colombia", start, 3, SeriesMode::Delta).unwrap();
    let second = country_series(&table, "Colombia", start, 3, SeriesMode::Delta).unwrap();
    assert_eq!(first, second);
}

#[test]
fn shared_budget_pads_short_series_with_missing_markers() {
    // Italy has 15 columns from its start date, Colombia only 7; both get
    // the same 20-day budget and missing-marker tails.
    let table_start = date(2020, 3, 1);
    let mut headers = vec![
        "Province/State".to_string(),
        "Country/Region".to_string(),
        "Lat".to_string(),
        "Long".to_string(),
    ];
    let mut colombia = vec![
        String::new(),
        "Colombia".to_string(),
        "0.0".to_string(),
        "0.0".to_string(),
    ];
    let mut italy = colombia.clone();
    italy[1] = "Italy".to_string();
    for offset in 0..15 {
        headers.push(format_key(table_start + Duration::days(offset)));
        colombia.push((offset + 1).to_string());
        italy.push((offset * 10).to_string());
    }
    let table = WideTable::from_parts(headers, vec![colombia, italy]).unwrap();

    let profiles = vec![
        profile("Colombia", date(2020, 3, 9)),
        profile("Italy", date(2020, 3, 1)),
    ];
    // Budget: 2020-03-15 minus 2020-03-09 = 6 days, plus the 14 extra.
    assert_eq!(day_budget(&table, date(2020, 3, 9)).unwrap(), 20);
    let aligned =
        countries_progression(&table, &profiles, DateSelector::FirstCase, date(2020, 3, 9))
            .unwrap();

    assert_eq!(aligned.day_budget(), 20);
    let colombia = aligned.column("Colombia").unwrap();
    let italy = aligned.column("Italy").unwrap();
    assert_eq!(colombia.len(), 20);
    assert_eq!(italy.len(), 20);
    // Colombia has 7 columns left from its start date, Italy all 15; both
    // tails are missing markers, never zero.
    assert_eq!(colombia.iter().filter(|cell| cell.is_some()).count(), 7);
    assert_eq!(italy.iter().filter(|cell| cell.is_some()).count(), 15);
    assert_eq!(colombia[0], Some(9));
    assert_eq!(colombia[6], Some(15));
    assert_eq!(colombia[7], None);
    assert_eq!(italy[14], Some(140));
    assert_eq!(italy[15], None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn delta_is_first_difference_of_cumulative(
        increments in proptest::collection::vec(any::<u16>(), 1..40)
    ) {
        let start = date(2020, 3, 6);
        let mut running = 0i64;
        let cells: Vec<String> = increments
            .iter()
            .map(|increment| {
                running += i64::from(*increment);
                running.to_string()
            })
            .collect();
        let cell_refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let table = wide_table("Colombia", start, &cell_refs);

        let cumulative = country_series(
            &table, "Colombia", start, cells.len(), SeriesMode::Cumulative,
        ).unwrap().counts();
        let delta = country_series(
            &table, "Colombia", start, cells.len(), SeriesMode::Delta,
        ).unwrap().counts();

        assert_eq!(delta[0], cumulative[0]);
        for index in 1..cumulative.len() {
            assert_eq!(delta[index], cumulative[index] - cumulative[index - 1]);
        }
    }
}
