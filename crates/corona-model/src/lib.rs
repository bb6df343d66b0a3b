pub mod dates;
pub mod error;
pub mod line_list;
pub mod profile;
pub mod series;
pub mod table;

pub use error::{CoronaError, Result};
pub use line_list::LineListRecord;
pub use profile::{CountryProfile, DateSelector, REFERENCE_COUNTRY, countries_of_interest};
pub use series::{AlignedTable, DerivedSeries, SeriesMode, SeriesPoint};
pub use table::OutputTable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_table_pads_short_columns() {
        let mut table = AlignedTable::new(4);
        table.push_column("Colombia".to_string(), vec![Some(1), Some(3)]);
        table.push_column("Italy".to_string(), vec![Some(2); 4]);
        assert_eq!(table.column("Colombia").unwrap().len(), 4);
        assert_eq!(table.cell(2, 0), Some(3));
        assert_eq!(table.cell(3, 0), None);
        assert_eq!(table.cell(4, 1), Some(2));
    }

    #[test]
    fn registry_is_anchored_on_colombia() {
        let profiles = countries_of_interest();
        assert_eq!(profiles.len(), 10);
        assert_eq!(profiles[0].name, REFERENCE_COUNTRY);
        let colombia = &profiles[0];
        assert!(colombia.start_date(DateSelector::FirstCase) < colombia.first_death);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = LineListRecord {
            notified: chrono::NaiveDate::from_ymd_opt(2020, 3, 6).unwrap(),
            death_date: None,
            city: "Bogotá D.C.".to_string(),
            department: "Bogotá D.C.".to_string(),
            treatment: "Casa".to_string(),
            age: Some(19),
            sex: "F".to_string(),
            case_type: "Importado".to_string(),
            origin: Some("Italia".to_string()),
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: LineListRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}
