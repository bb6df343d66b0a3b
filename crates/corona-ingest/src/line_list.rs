//! Colombian line-list reader.
//!
//! The upstream INS export uses Spanish column headers; a fixed rename
//! table maps them onto the canonical record attributes. The rename table
//! is part of the ingestion contract and must be kept in sync with the
//! upstream schema.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use tracing::debug;

use corona_model::LineListRecord;

use crate::error::{IngestError, Result};
use crate::wide::normalize_header;

/// Upstream header -> canonical attribute. The upstream `ID de caso`
/// column is intentionally absent: it is dropped on load.
pub const HEADER_RENAMES: &[(&str, &str)] = &[
    ("Fecha de notificación", "date"),
    ("Fecha de muerte", "date_death"),
    ("Nombre municipio", "city"),
    ("Departamento", "dept"),
    ("Atención", "treatment"),
    ("Edad", "age"),
    ("Sexo", "sex"),
    ("Tipo", "type"),
    ("Nombre del país", "origin"),
];

/// Date layouts observed across upstream export revisions.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y", "%Y-%m-%dT%H:%M:%S%.3f"];

pub fn read_line_list(path: &Path) -> Result<Vec<LineListRecord>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    let columns = ColumnMap::resolve(&headers, path)?;

    let mut records = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record?;
        let row = offset + 1;
        let cell = |index: usize| record.get(index).unwrap_or("").trim();
        records.push(LineListRecord {
            notified: parse_date(cell(columns.date)).ok_or_else(|| bad_value(
                path,
                row,
                "date",
                cell(columns.date),
            ))?,
            death_date: parse_optional_date(cell(columns.date_death))
                .map_err(|value| bad_value(path, row, "date_death", &value))?,
            city: cell(columns.city).to_string(),
            department: cell(columns.dept).to_string(),
            treatment: cell(columns.treatment).to_string(),
            age: parse_age(cell(columns.age))
                .map_err(|value| bad_value(path, row, "age", &value))?,
            sex: cell(columns.sex).to_string(),
            case_type: cell(columns.case_type).to_string(),
            origin: non_empty(cell(columns.origin)),
        });
    }
    debug!(path = %path.display(), records = records.len(), "line list loaded");
    Ok(records)
}

struct ColumnMap {
    date: usize,
    date_death: usize,
    city: usize,
    dept: usize,
    treatment: usize,
    age: usize,
    sex: usize,
    case_type: usize,
    origin: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        let find = |canonical: &str| -> Result<usize> {
            let (upstream, _) = HEADER_RENAMES
                .iter()
                .find(|(_, name)| *name == canonical)
                .expect("canonical name in rename table");
            headers
                .iter()
                .position(|header| header == upstream)
                .ok_or_else(|| IngestError::MissingColumn {
                    path: path.to_path_buf(),
                    name: (*upstream).to_string(),
                })
        };
        Ok(Self {
            date: find("date")?,
            date_death: find("date_death")?,
            city: find("city")?,
            dept: find("dept")?,
            treatment: find("treatment")?,
            age: find("age")?,
            sex: find("sex")?,
            case_type: find("type")?,
            origin: find("origin")?,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Empty cells mean "no death". Anything else must parse as a date.
fn parse_optional_date(value: &str) -> std::result::Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some).ok_or_else(|| value.to_string())
}

fn parse_age(value: &str) -> std::result::Result<Option<u32>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<u32>().map(Some).map_err(|_| value.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn bad_value(path: &Path, row: usize, column: &str, value: &str) -> IngestError {
    IngestError::BadValue {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}
