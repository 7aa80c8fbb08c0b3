use almanac_core::types::Classification;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated instance of an event source, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub key: String,
    pub date: NaiveDate,
    pub name: String,
    pub provenance: String,
}

impl Occurrence {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        date: NaiveDate,
        name: impl Into<String>,
        provenance: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            date,
            name: name.into(),
            provenance: provenance.into(),
        }
    }
}

/// A classified, dated entry of the generated calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub date: NaiveDate,
    pub classification: Classification,
    pub description: String,
    pub provenance: String,
}
