use almanac_engine::Event;

use crate::error::AppResult;

/// ## Summary
/// Serializes events as a JSON array of
/// `{date, classification, description, provenance}` objects.
///
/// ## Errors
/// Returns an error if serialization fails.
pub fn render_events(events: &[Event], pretty: bool) -> AppResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(events)?
    } else {
        serde_json::to_string(events)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::types::Classification;
    use chrono::NaiveDate;

    #[test]
    fn test_render_compact() {
        let events = vec![Event {
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            classification: Classification::Closed,
            description: "Independence Day".to_string(),
            provenance: "rule:independence-day".to_string(),
        }];
        assert_eq!(
            render_events(&events, false).unwrap(),
            r#"[{"date":"2024-07-04","classification":"CLOSED","description":"Independence Day","provenance":"rule:independence-day"}]"#
        );
        assert!(render_events(&events, true).unwrap().contains("\n  {"));
    }
}
