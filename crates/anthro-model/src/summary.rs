//! Group keys and summary rows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite key `(sport, medal, sex, country_noc)` of one summary group.
///
/// `medal` is `None` for entries without a medal; such entries form their own
/// group rather than being dropped. The other key parts can also be null in
/// source data and are kept as `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub sport: Option<String>,
    pub medal: Option<String>,
    pub sex: Option<String>,
    pub country_noc: Option<String>,
}

impl GroupKey {
    pub fn new(sport: &str, medal: Option<&str>, sex: &str, country_noc: &str) -> Self {
        Self {
            sport: Some(sport.to_string()),
            medal: medal.map(str::to_string),
            sex: Some(sex.to_string()),
            country_noc: Some(country_noc.to_string()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{}/{}/{}/{}",
            part(&self.sport),
            part(&self.medal),
            part(&self.sex),
            part(&self.country_noc)
        )
    }
}

/// Average measurements of one group, as persisted in the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub avg_height: f64,
    pub avg_weight: f64,
    pub computed_at: DateTime<Utc>,
}
