use chrono::NaiveDate;
use thiserror::Error;

/// Failure taxonomy for derivations.
///
/// A computed date key that is absent from a wide table is *not* an error:
/// it marks the end of available data and callers terminate the affected
/// series early instead.
#[derive(Debug, Error)]
pub enum CoronaError {
    #[error("country not found in wide table: {country:?}")]
    CountryNotFound { country: String },
    #[error("malformed cell for {country:?} at column {column:?}: {value:?}")]
    MalformedCell {
        country: String,
        column: String,
        value: String,
    },
    #[error("invalid date order: {later} is before {earlier}")]
    InvalidDateOrder {
        later: NaiveDate,
        earlier: NaiveDate,
    },
    #[error("missing column: {name:?}")]
    MissingColumn { name: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CoronaError>;
