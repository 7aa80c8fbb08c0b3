use almanac_core::types::{Classification, WeekendShiftPolicy};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Delta, EventSource};

/// Descriptive metadata of a calendar.
///
/// Every field is optional so that a child calendar can inherit what it
/// leaves unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "calendar-system",
        skip_serializing_if = "Option::is_none"
    )]
    pub calendar_system: Option<String>,
}

impl CalendarMetadata {
    /// Overlays `other` on top of `self`, field by field.
    pub fn overlay(&mut self, other: &Self) {
        if other.name.is_some() {
            self.name.clone_from(&other.name);
        }
        if other.description.is_some() {
            self.description.clone_from(&other.description);
        }
        if other.calendar_system.is_some() {
            self.calendar_system.clone_from(&other.calendar_system);
        }
    }
}

/// A `kind: calendar` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpecification {
    pub id: String,
    #[serde(default)]
    pub metadata: CalendarMetadata,
    /// Parent calendars, merged in declaration order.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Modules, merged after every parent.
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_shift_policy: Option<WeekendShiftPolicy>,
    #[serde(default)]
    pub event_sources: Vec<EventSource>,
    /// Classification overrides by event key.
    #[serde(default)]
    pub classifications: IndexMap<String, Classification>,
    #[serde(default)]
    pub deltas: Vec<Delta>,
}

impl CalendarSpecification {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: CalendarMetadata::default(),
            extends: Vec::new(),
            uses: Vec::new(),
            weekend_shift_policy: None,
            event_sources: Vec::new(),
            classifications: IndexMap::new(),
            deltas: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_calendar_document() {
        let json = r#"{
            "id": "nyse",
            "metadata": {"name": "NYSE", "calendar-system": "gregorian"},
            "extends": ["us-federal"],
            "uses": ["christian-holidays"],
            "weekend_shift_policy": "NEAREST_WEEKDAY",
            "classifications": {"christmas-eve": "EARLY_CLOSE"},
            "deltas": [{"action": "remove", "key": "columbus-day", "date": "2024-10-14"}]
        }"#;
        let calendar: CalendarSpecification = serde_json::from_str(json).unwrap();
        assert_eq!(calendar.metadata.calendar_system.as_deref(), Some("gregorian"));
        assert_eq!(calendar.extends, vec!["us-federal"]);
        assert_eq!(
            calendar.weekend_shift_policy,
            Some(WeekendShiftPolicy::NearestWeekday)
        );
        assert_eq!(
            calendar.classifications.get("christmas-eve"),
            Some(&Classification::EarlyClose)
        );
        assert_eq!(calendar.deltas.len(), 1);
        assert!(calendar.event_sources.is_empty());
    }

    #[test]
    fn test_metadata_overlay_keeps_unset_fields() {
        let mut base = CalendarMetadata {
            name: Some("Base".to_string()),
            description: Some("inherited".to_string()),
            calendar_system: Some("gregorian".to_string()),
        };
        base.overlay(&CalendarMetadata {
            name: Some("Child".to_string()),
            ..CalendarMetadata::default()
        });
        assert_eq!(base.name.as_deref(), Some("Child"));
        assert_eq!(base.description.as_deref(), Some("inherited"));
        assert_eq!(base.calendar_system.as_deref(), Some("gregorian"));
    }
}
