//! Derivation engine over the loaded wide tables and line list.

pub mod cities;
pub mod origins;
pub mod progression;
pub mod reports;
pub mod series;
pub mod session;

pub use cities::{CityAggregator, GapFill, fill_gaps};
pub use origins::{MISSING_ORIGIN, OriginBreakdown, OriginTally, tally_origins};
pub use progression::{EXTRA_DAYS, countries_progression, day_budget};
pub use reports::{cases_per_age, cases_per_city};
pub use series::country_series;
pub use session::Session;
