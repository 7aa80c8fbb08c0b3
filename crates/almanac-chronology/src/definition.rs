//! Data description of custom calendar systems.

use serde::{Deserialize, Serialize};

/// A `kind: chronology` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronologyDefinition {
    pub id: String,
    #[serde(default)]
    pub metadata: ChronologyMetadata,
    pub structure: ChronologyStructure,
    pub algorithms: AlgorithmDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronologyMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Year layout: the pivot of day 1 of month 1 of year 1, and the months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronologyStructure {
    pub epoch_pivot: i64,
    pub months: Vec<MonthDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDefinition {
    pub name: String,
    pub days: u32,
    /// Length in leap years, when it differs from `days`.
    #[serde(default)]
    pub leap_days: Option<u32>,
}

impl MonthDefinition {
    #[must_use]
    pub fn days_in(&self, leap: bool) -> u32 {
        if leap {
            self.leap_days.unwrap_or(self.days)
        } else {
            self.days
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmDefinition {
    #[serde(rename = "type")]
    pub kind: AlgorithmKind,
    #[serde(default)]
    pub leap_year: Option<String>,
}

/// Algorithm families a chronology document may declare.
///
/// Only `Formula` can be registered; the others are accepted by the schema
/// and rejected at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlgorithmKind {
    Formula,
    LookupTable,
    MetonicCycle,
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Formula => "FORMULA",
            Self::LookupTable => "LOOKUP_TABLE",
            Self::MetonicCycle => "METONIC_CYCLE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_formula_document() {
        let json = r#"{
            "id": "decimal",
            "metadata": {"name": "Decimal calendar"},
            "structure": {
                "epoch_pivot": 2451545,
                "months": [
                    {"name": "Primo", "days": 36},
                    {"name": "Ultimo", "days": 5, "leap_days": 6}
                ]
            },
            "algorithms": {"type": "FORMULA", "leap_year": "year % 4 == 0"}
        }"#;
        let definition: ChronologyDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.id, "decimal");
        assert_eq!(definition.structure.months.len(), 2);
        assert_eq!(definition.structure.months[1].days_in(true), 6);
        assert_eq!(definition.structure.months[0].days_in(true), 36);
        assert_eq!(definition.algorithms.kind, AlgorithmKind::Formula);
    }

    #[test]
    fn test_deserialize_lookup_table_kind() {
        let json = r#"{"type": "LOOKUP_TABLE"}"#;
        let algorithms: AlgorithmDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(algorithms.kind, AlgorithmKind::LookupTable);
        assert!(algorithms.leap_year.is_none());
    }
}
