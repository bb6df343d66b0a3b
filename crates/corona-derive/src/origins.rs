//! Origin normalization and tallying.
//!
//! Free-text origin values are either a single place, a `-`-delimited list
//! of candidate places, or absent. Single places land in the definite
//! tally; candidates and absences land in the possible tally. Place names
//! are diacritic-folded so spelling variants like `España`/`Espana` share a
//! bucket; letter case is preserved and still distinguishes buckets.

use std::collections::BTreeMap;

use deunicode::deunicode;

use corona_model::OutputTable;

/// Reserved possible-tally bucket for absent origin values.
pub const MISSING_ORIGIN: &str = "Nan";

/// Delimiter separating candidate places in an ambiguous origin value.
const CANDIDATE_DELIMITER: char = '-';

/// Counts per normalized place name, iterable in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginTally {
    order: Vec<String>,
    counts: BTreeMap<String, u64>,
}

impl OriginTally {
    fn add(&mut self, place: String) {
        match self.counts.get_mut(&place) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(place.clone(), 1);
                self.order.push(place);
            }
        }
    }

    pub fn get(&self, place: &str) -> Option<u64> {
        self.counts.get(place).copied()
    }

    /// `(place, count)` pairs in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(|place| (place.as_str(), self.counts[place]))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Render with the stable `origin`/`cases` column contract.
    pub fn to_output_table(&self, name: &str) -> OutputTable {
        let mut table = OutputTable::new(name, vec!["origin".to_string(), "cases".to_string()]);
        for (place, count) in self.entries() {
            table.push_row(vec![place.to_string(), count.to_string()]);
        }
        table
    }
}

/// Definite and possible origin tallies for one pass over the line list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginBreakdown {
    pub definite: OriginTally,
    pub possible: OriginTally,
}

/// Classify and tally a sequence of origin field values.
///
/// A multi-candidate record contributes one count per candidate place, so
/// the possible tally can exceed the number of ambiguous records.
pub fn tally_origins<'a, I>(values: I) -> OriginBreakdown
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut breakdown = OriginBreakdown::default();
    for value in values {
        match value {
            None => breakdown.possible.add(MISSING_ORIGIN.to_string()),
            Some(value) if value.contains(CANDIDATE_DELIMITER) => {
                for candidate in value.split(CANDIDATE_DELIMITER) {
                    breakdown.possible.add(deunicode(candidate.trim()));
                }
            }
            Some(value) => breakdown.definite.add(deunicode(value)),
        }
    }
    breakdown
}
