use chrono::NaiveDate;

/// Which outbreak anchor date a derivation aligns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelector {
    FirstCase,
    FirstDeath,
}

/// Static registry entry for a country of interest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountryProfile {
    pub name: String,
    pub first_case: NaiveDate,
    pub first_death: NaiveDate,
}

impl CountryProfile {
    pub fn start_date(&self, selector: DateSelector) -> NaiveDate {
        match selector {
            DateSelector::FirstCase => self.first_case,
            DateSelector::FirstDeath => self.first_death,
        }
    }
}

/// The country whose data span anchors the shared day budget.
pub const REFERENCE_COUNTRY: &str = "Colombia";

/// Fixed set of countries of interest, in output column order.
pub fn countries_of_interest() -> Vec<CountryProfile> {
    vec![
        profile("Colombia", ymd(2020, 3, 6), ymd(2020, 3, 22)),
        profile("Italy", ymd(2020, 1, 31), ymd(2020, 2, 21)),
        profile("Spain", ymd(2020, 2, 1), ymd(2020, 3, 3)),
        profile("Peru", ymd(2020, 3, 6), ymd(2020, 3, 20)),
        profile("Ecuador", ymd(2020, 3, 1), ymd(2020, 3, 14)),
        profile("Argentina", ymd(2020, 3, 3), ymd(2020, 3, 8)),
        profile("Chile", ymd(2020, 3, 3), ymd(2020, 3, 22)),
        profile("Venezuela", ymd(2020, 3, 14), ymd(2020, 3, 27)),
        profile("Brazil", ymd(2020, 2, 26), ymd(2020, 3, 17)),
        profile("Mexico", ymd(2020, 2, 28), ymd(2020, 3, 19)),
    ]
}

fn profile(name: &str, first_case: NaiveDate, first_death: NaiveDate) -> CountryProfile {
    CountryProfile {
        name: name.to_string(),
        first_case,
        first_death,
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid registry date")
}
