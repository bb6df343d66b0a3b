//! Explicit per-run state.
//!
//! A [`Session`] owns the three loaded inputs for one batch run. Every
//! derivation hangs off it, so multiple datasets or test fixtures coexist
//! without reload side effects. All derivations are independent read-only
//! views over the same inputs.

use corona_model::dates::days_between;
use corona_model::{
    AlignedTable, CoronaError, CountryProfile, DateSelector, DerivedSeries, LineListRecord,
    REFERENCE_COUNTRY, Result, SeriesMode, countries_of_interest,
};

use corona_ingest::WideTable;

use crate::cities::CityAggregator;
use crate::origins::{OriginBreakdown, tally_origins};
use crate::progression::countries_progression;
use crate::reports;
use crate::series::country_series;

pub struct Session {
    cases: WideTable,
    deaths: WideTable,
    line_list: Vec<LineListRecord>,
    profiles: Vec<CountryProfile>,
}

impl Session {
    pub fn new(cases: WideTable, deaths: WideTable, line_list: Vec<LineListRecord>) -> Self {
        Self::with_profiles(cases, deaths, line_list, countries_of_interest())
    }

    pub fn with_profiles(
        cases: WideTable,
        deaths: WideTable,
        line_list: Vec<LineListRecord>,
        profiles: Vec<CountryProfile>,
    ) -> Self {
        Self {
            cases,
            deaths,
            line_list,
            profiles,
        }
    }

    pub fn line_list(&self) -> &[LineListRecord] {
        &self.line_list
    }

    pub fn profiles(&self) -> &[CountryProfile] {
        &self.profiles
    }

    /// Daily new cases for the reference country, from its first case to
    /// the last available table column.
    pub fn cases_per_day(&self) -> Result<DerivedSeries> {
        self.reference_series(&self.cases, DateSelector::FirstCase, SeriesMode::Delta)
    }

    /// Daily new deaths for the reference country.
    pub fn deaths_per_day(&self) -> Result<DerivedSeries> {
        self.reference_series(&self.deaths, DateSelector::FirstDeath, SeriesMode::Delta)
    }

    /// Cumulative cases for the reference country.
    pub fn total_cases_per_day(&self) -> Result<DerivedSeries> {
        self.reference_series(&self.cases, DateSelector::FirstCase, SeriesMode::Cumulative)
    }

    /// Cumulative deaths for the reference country.
    pub fn total_deaths_per_day(&self) -> Result<DerivedSeries> {
        self.reference_series(&self.deaths, DateSelector::FirstDeath, SeriesMode::Cumulative)
    }

    /// Definite and possible origin tallies over the whole line list.
    pub fn origins(&self) -> OriginBreakdown {
        tally_origins(self.line_list.iter().map(|record| record.origin.as_deref()))
    }

    /// All countries' cumulative case series aligned on their own first
    /// case dates.
    pub fn countries_cases_progression(&self) -> Result<AlignedTable> {
        let reference = self.reference_profile()?;
        countries_progression(
            &self.cases,
            &self.profiles,
            DateSelector::FirstCase,
            reference.first_case,
        )
    }

    /// All countries' cumulative death series aligned on their own first
    /// death dates.
    pub fn countries_deaths_progression(&self) -> Result<AlignedTable> {
        let reference = self.reference_profile()?;
        countries_progression(
            &self.deaths,
            &self.profiles,
            DateSelector::FirstDeath,
            reference.first_death,
        )
    }

    pub fn city_aggregator(&self) -> CityAggregator<'_> {
        CityAggregator::new(&self.line_list)
    }

    pub fn cases_per_age(&self) -> Vec<(u32, u64)> {
        reports::cases_per_age(&self.line_list)
    }

    pub fn cases_per_city(&self) -> Vec<(String, u64)> {
        reports::cases_per_city(&self.line_list)
    }

    fn reference_profile(&self) -> Result<&CountryProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name == REFERENCE_COUNTRY)
            .ok_or_else(|| CoronaError::CountryNotFound {
                country: REFERENCE_COUNTRY.to_string(),
            })
    }

    fn reference_series(
        &self,
        table: &WideTable,
        selector: DateSelector,
        mode: SeriesMode,
    ) -> Result<DerivedSeries> {
        let reference = self.reference_profile()?;
        let start = reference.start_date(selector);
        let day_count = days_between(table.last_available_date(), start)? as usize + 1;
        country_series(table, &reference.name, start, day_count, mode)
    }
}
