use chrono::NaiveDate;

/// One diagnosed case from the Colombian line list. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineListRecord {
    /// Notification date; also the grouping axis for per-day counts.
    pub notified: NaiveDate,
    /// Present only for fatal cases; the null/non-null split partitions the
    /// line list into the case and death sub-populations.
    pub death_date: Option<NaiveDate>,
    pub city: String,
    pub department: String,
    pub treatment: String,
    /// Raw reported age. The source leaves some ages blank.
    pub age: Option<u32>,
    pub sex: String,
    pub case_type: String,
    /// Free-text origin: absent, a single place, or a `-`-delimited list of
    /// candidate places.
    pub origin: Option<String>,
}

impl LineListRecord {
    pub fn is_death(&self) -> bool {
        self.death_date.is_some()
    }
}
