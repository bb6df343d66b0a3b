//! Wide cumulative table reader.
//!
//! A wide table holds one row per region and one column per calendar day,
//! with cumulative counts in the cells. The date columns are indexed once
//! at load into an ordered `date -> column` map, so a probe for a day past
//! the final column is an explicit end-of-data boundary rather than a
//! header scan.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use corona_model::dates::parse_key;

use crate::error::{IngestError, Result};

/// Header of the column that keys rows by country.
pub const COUNTRY_COLUMN: &str = "Country/Region";

#[derive(Debug, Clone)]
pub struct WideTable {
    headers: Vec<String>,
    country_column: usize,
    date_columns: BTreeMap<NaiveDate, usize>,
    rows: Vec<Vec<String>>,
}

impl WideTable {
    /// Read a wide table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut records = reader.records();
        let Some(header_record) = records.next().transpose()? else {
            return Err(IngestError::NoDateColumns {
                path: path.to_path_buf(),
            });
        };
        let headers: Vec<String> = header_record.iter().map(normalize_header).collect();
        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let mut row = Vec::with_capacity(headers.len());
            for index in 0..headers.len() {
                row.push(record.get(index).unwrap_or("").trim().to_string());
            }
            rows.push(row);
        }
        let table = Self::from_parts(headers, rows).map_err(|error| match error {
            IngestError::MissingColumn { name, .. } => IngestError::MissingColumn {
                path: path.to_path_buf(),
                name,
            },
            IngestError::NoDateColumns { .. } => IngestError::NoDateColumns {
                path: path.to_path_buf(),
            },
            other => other,
        })?;
        debug!(
            path = %path.display(),
            rows = table.rows.len(),
            date_columns = table.date_columns.len(),
            "wide table loaded"
        );
        Ok(table)
    }

    /// Build a wide table from already-split headers and rows. Headers that
    /// do not parse as `M/D/YY` keys are treated as leading metadata.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let country_column = headers
            .iter()
            .position(|header| header == COUNTRY_COLUMN)
            .ok_or_else(|| IngestError::MissingColumn {
                path: Default::default(),
                name: COUNTRY_COLUMN.to_string(),
            })?;
        let mut date_columns = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(date) = parse_key(header) {
                date_columns.insert(date, index);
            }
        }
        if date_columns.is_empty() {
            return Err(IngestError::NoDateColumns {
                path: Default::default(),
            });
        }
        Ok(Self {
            headers,
            country_column,
            date_columns,
            rows,
        })
    }

    /// Index of the first row whose country column equals `country` exactly.
    /// The match is case-sensitive and first match wins.
    pub fn find_country(&self, country: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row[self.country_column] == country)
    }

    /// Raw cell for a row and calendar day. `None` means the table has no
    /// column for that day, which callers treat as end of available data.
    pub fn value(&self, row: usize, date: NaiveDate) -> Option<&str> {
        let column = *self.date_columns.get(&date)?;
        self.rows.get(row).map(|cells| cells[column].as_str())
    }

    /// Final date column of the table; its temporal upper bound.
    pub fn last_available_date(&self) -> NaiveDate {
        *self
            .date_columns
            .keys()
            .next_back()
            .expect("wide table has at least one date column")
    }

    pub fn first_available_date(&self) -> NaiveDate {
        *self
            .date_columns
            .keys()
            .next()
            .expect("wide table has at least one date column")
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WideTable {
        let headers = vec![
            "Province/State".to_string(),
            "Country/Region".to_string(),
            "Lat".to_string(),
            "Long".to_string(),
            "3/6/20".to_string(),
            "3/7/20".to_string(),
            "3/8/20".to_string(),
        ];
        let rows = vec![
            vec!["", "Colombia", "4.57", "-74.29", "1", "3", "3"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec!["", "Italy", "41.87", "12.56", "3916", "5883", "7375"]
                .into_iter()
                .map(String::from)
                .collect(),
        ];
        WideTable::from_parts(headers, rows).unwrap()
    }

    #[test]
    fn country_lookup_is_case_sensitive_first_match() {
        let table = sample();
        assert_eq!(table.find_country("Colombia"), Some(0));
        assert_eq!(table.find_country("colombia"), None);
        assert_eq!(table.find_country("France"), None);
    }

    #[test]
    fn value_returns_none_past_last_column() {
        let table = sample();
        let day = NaiveDate::from_ymd_opt(2020, 3, 8).unwrap();
        assert_eq!(table.value(0, day), Some("3"));
        assert_eq!(table.value(0, day.succ_opt().unwrap()), None);
        assert_eq!(table.last_available_date(), day);
    }

    #[test]
    fn metadata_headers_are_not_date_columns() {
        let table = sample();
        assert_eq!(
            table.first_available_date(),
            NaiveDate::from_ymd_opt(2020, 3, 6).unwrap()
        );
        assert_eq!(table.headers().len(), 7);
    }

    #[test]
    fn missing_country_column_is_rejected() {
        let result = WideTable::from_parts(
            vec!["Region".to_string(), "3/6/20".to_string()],
            Vec::new(),
        );
        assert!(matches!(result, Err(IngestError::MissingColumn { .. })));
    }
}
