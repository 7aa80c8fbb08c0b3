use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::EventSource;

/// A named date-producing function, such as Western Easter.
///
/// References emit no events themselves; rules anchor on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub key: String,
    pub formula: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePolicies {
    /// Weekend days contributed by this module. Empty means "no opinion".
    #[serde(default)]
    pub weekends: Vec<Weekday>,
}

/// A `kind: module` document. Modules have no parents; they only compose
/// other modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpecification {
    pub id: String,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub policies: ModulePolicies,
    #[serde(default)]
    pub event_sources: Vec<EventSource>,
}

impl ModuleSpecification {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uses: Vec::new(),
            references: Vec::new(),
            policies: ModulePolicies::default(),
            event_sources: Vec::new(),
        }
    }
}
