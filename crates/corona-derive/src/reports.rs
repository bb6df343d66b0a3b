//! Cross-sectional tallies over the line list. No temporal dimension.

use std::collections::BTreeMap;

use corona_model::LineListRecord;

/// Count of records per distinct raw age value, descending by count with
/// ties in first-encountered order. The output label stays "age group"
/// even though the source field is a raw integer, not a bracket; blank
/// ages are skipped.
pub fn cases_per_age(records: &[LineListRecord]) -> Vec<(u32, u64)> {
    ranked_counts(records.iter().filter_map(|record| record.age))
}

/// Count of records per distinct city, descending by count with ties in
/// first-encountered order.
pub fn cases_per_city(records: &[LineListRecord]) -> Vec<(String, u64)> {
    ranked_counts(records.iter().map(|record| record.city.clone()))
}

fn ranked_counts<K: Ord + Clone>(keys: impl Iterator<Item = K>) -> Vec<(K, u64)> {
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    let mut order: Vec<K> = Vec::new();
    for key in keys {
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }
    let mut ranked: Vec<(K, u64)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    // Stable sort keeps first-encountered order within equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(city: &str, age: Option<u32>) -> LineListRecord {
        LineListRecord {
            notified: NaiveDate::from_ymd_opt(2020, 3, 6).unwrap(),
            death_date: None,
            city: city.to_string(),
            department: String::new(),
            treatment: String::new(),
            age,
            sex: "F".to_string(),
            case_type: String::new(),
            origin: None,
        }
    }

    #[test]
    fn per_city_is_descending_with_first_seen_ties() {
        let records = vec![
            record("Cali", Some(30)),
            record("Medellín", Some(31)),
            record("Bogotá D.C.", Some(32)),
            record("Medellín", Some(33)),
        ];
        let ranked = cases_per_city(&records);
        assert_eq!(ranked[0], ("Medellín".to_string(), 2));
        // Cali and Bogotá tie at 1; Cali was seen first.
        assert_eq!(ranked[1].0, "Cali");
        assert_eq!(ranked[2].0, "Bogotá D.C.");
    }

    #[test]
    fn per_age_buckets_raw_values_and_skips_blanks() {
        let records = vec![
            record("Cali", Some(30)),
            record("Cali", Some(30)),
            record("Cali", Some(31)),
            record("Cali", None),
        ];
        let ranked = cases_per_age(&records);
        assert_eq!(ranked, vec![(30, 2), (31, 1)]);
    }
}
