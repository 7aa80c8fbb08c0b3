use almanac_core::types::Classification;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An explicit override applied after rule expansion and weekend shifting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Delta {
    Add {
        key: String,
        date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        classification: Option<Classification>,
    },
    Remove {
        key: String,
        date: NaiveDate,
    },
    /// Consumed at classification time rather than by the delta pass.
    Reclassify {
        key: String,
        date: NaiveDate,
        classification: Classification,
    },
}

impl Delta {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Add { key, .. } | Self::Remove { key, .. } | Self::Reclassify { key, .. } => key,
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Add { date, .. } | Self::Remove { date, .. } | Self::Reclassify { date, .. } => {
                *date
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_tags() {
        let delta: Delta = serde_json::from_str(
            r#"{"action": "reclassify", "key": "christmas-eve", "date": "2024-12-24", "classification": "EARLY_CLOSE"}"#,
        )
        .unwrap();
        assert_eq!(delta.key(), "christmas-eve");
        assert_eq!(delta.date(), NaiveDate::from_ymd_opt(2024, 12, 24).unwrap());
        assert!(matches!(
            delta,
            Delta::Reclassify {
                classification: Classification::EarlyClose,
                ..
            }
        ));
    }

    #[test]
    fn test_add_delta_optional_fields() {
        let delta: Delta =
            serde_json::from_str(r#"{"action": "add", "key": "carter-funeral", "date": "2025-01-09"}"#)
                .unwrap();
        assert!(matches!(
            delta,
            Delta::Add {
                name: None,
                classification: None,
                ..
            }
        ));
    }
}
