//! Log-entry handling: search-result grouping and entry-group properties.
//!
//! Search results arrive from the service as a flat JSON array. For display
//! the client groups entries by calendar day, newest first; entries that were
//! created as replies within a group carry the special `Log Entry Group`
//! property, whose `id` attribute ties them together.

mod types;

pub use types::{Attachment, Attribute, LogEntry, Logbook, Property, Tag};

use crate::markup::MarkupResult;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Name of the special property tying grouped entries together.
pub const LOG_ENTRY_GROUP: &str = "Log Entry Group";

const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";
const SHORT_TIME_FORMAT: &str = "%H:%M";

/// Formats a timestamp as `YYYY-MM-DD`.
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// Formats a timestamp as `HH:MM`.
pub fn format_short_time(date: &DateTime<Utc>) -> String {
    date.format(SHORT_TIME_FORMAT).to_string()
}

/// Entries created on the same calendar day (UTC).
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// The calendar day shared by all entries in the group.
    pub date: NaiveDate,
    /// Entries of that day, newest first.
    pub entries: Vec<LogEntry>,
}

/// Groups search-result entries by calendar day, newest day first.
///
/// Entries are sorted descending on creation time, then bucketed; within a
/// day the descending order is kept. An empty input yields an empty result.
///
/// ## Examples
///
/// ```
/// use logmark_lib::entry::{group_by_day, LogEntry};
///
/// let groups = group_by_day(Vec::<LogEntry>::new());
/// assert!(groups.is_empty());
/// ```
pub fn group_by_day(mut entries: Vec<LogEntry>) -> Vec<DayGroup> {
    entries.sort_by(|a, b| b.created_date.cmp(&a.created_date));

    let mut groups: Vec<DayGroup> = Vec::new();
    for entry in entries {
        let date = entry.created_date.date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.entries.push(entry),
            _ => groups.push(DayGroup {
                date,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Parses a JSON search-result payload into entries.
pub fn parse_search_result(json: &str) -> MarkupResult<Vec<LogEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// Returns the group id carried by the `Log Entry Group` property, if any.
///
/// ## Examples
///
/// ```
/// use logmark_lib::entry::{log_entry_group_id, new_log_entry_group};
///
/// let property = new_log_entry_group();
/// assert!(log_entry_group_id(&[property]).is_some());
/// assert!(log_entry_group_id(&[]).is_none());
/// ```
pub fn log_entry_group_id(properties: &[Property]) -> Option<&str> {
    properties
        .iter()
        .filter(|property| property.name == LOG_ENTRY_GROUP)
        .flat_map(|property| &property.attributes)
        .find(|attribute| attribute.name == "id")
        .map(|attribute| attribute.value.as_str())
}

/// Creates a fresh `Log Entry Group` property with a random group id.
pub fn new_log_entry_group() -> Property {
    Property {
        name: LOG_ENTRY_GROUP.to_string(),
        attributes: vec![Attribute {
            name: "id".to_string(),
            value: Uuid::new_v4().to_string(),
        }],
    }
}

/// Returns `true` if the group property is the only property present.
///
/// Used to decide whether a property view is worth rendering at all.
pub fn has_only_log_entry_group(properties: &[Property]) -> bool {
    log_entry_group_id(properties).is_some() && properties.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(id: u64, created: DateTime<Utc>) -> LogEntry {
        LogEntry {
            id,
            title: format!("entry {id}"),
            owner: None,
            description: None,
            created_date: created,
            logbooks: Vec::new(),
            tags: Vec::new(),
            properties: Vec::new(),
            attachments: Vec::new(),
        }
    }

    fn group_property(value: &str) -> Property {
        Property {
            name: LOG_ENTRY_GROUP.to_string(),
            attributes: vec![Attribute {
                name: "id".to_string(),
                value: value.to_string(),
            }],
        }
    }

    // ==================== formatting ====================

    #[test]
    fn test_format_short_date() {
        let date = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_short_date(&date), "2023-11-14");
    }

    #[test]
    fn test_format_short_time() {
        let date = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_short_time(&date), "22:13");
    }

    // ==================== group_by_day ====================

    #[test]
    fn test_group_by_day_counts() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let two_days_ago = now - Duration::days(2);
        let two_weeks_ago = now - Duration::weeks(2);

        let entries = vec![
            entry(1, now),
            entry(2, now),
            entry(3, two_days_ago),
            entry(4, two_days_ago),
            entry(5, two_days_ago),
            entry(6, two_weeks_ago),
        ];

        let groups = group_by_day(entries);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[1].entries.len(), 3);
        assert_eq!(groups[2].entries.len(), 1);
    }

    #[test]
    fn test_group_by_day_sorts_unsorted_input_descending() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let entries = vec![
            entry(1, now - Duration::weeks(2)),
            entry(2, now - Duration::weeks(2)),
            entry(3, now),
            entry(4, now),
            entry(5, now),
            entry(6, now - Duration::days(2)),
        ];

        let groups = group_by_day(entries);
        assert_eq!(groups.len(), 3);
        // Day order is strictly descending.
        for pair in groups.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        assert_eq!(groups[0].entries.len(), 3);
    }

    #[test]
    fn test_group_by_day_orders_entries_within_day() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let earlier = now - Duration::hours(3);
        let groups = group_by_day(vec![entry(1, earlier), entry(2, now)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries[0].id, 2);
        assert_eq!(groups[0].entries[1].id, 1);
    }

    #[test]
    fn test_group_by_day_empty() {
        assert!(group_by_day(Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_search_result() {
        let json = r#"[{"id": 1, "title": "t", "createdDate": 1700000000000}]"#;
        let entries = parse_search_result(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 1);
    }

    #[test]
    fn test_parse_search_result_rejects_garbage() {
        assert!(parse_search_result("not json").is_err());
    }

    // ==================== group properties ====================

    #[test]
    fn test_log_entry_group_id_present() {
        let properties = vec![group_property("myLogEntryGroupId")];
        assert_eq!(log_entry_group_id(&properties), Some("myLogEntryGroupId"));
    }

    #[test]
    fn test_log_entry_group_id_missing() {
        let other = Property {
            name: "Not Log Entry Group".to_string(),
            attributes: vec![Attribute {
                name: "id".to_string(),
                value: "myLogEntryGroupId".to_string(),
            }],
        };
        assert!(log_entry_group_id(&[other]).is_none());

        let no_attributes = Property {
            name: LOG_ENTRY_GROUP.to_string(),
            attributes: Vec::new(),
        };
        assert!(log_entry_group_id(&[no_attributes]).is_none());

        let wrong_attribute = Property {
            name: LOG_ENTRY_GROUP.to_string(),
            attributes: vec![Attribute {
                name: "not id".to_string(),
                value: "myLogEntryGroupId".to_string(),
            }],
        };
        assert!(log_entry_group_id(&[wrong_attribute]).is_none());

        assert!(log_entry_group_id(&[]).is_none());
    }

    #[test]
    fn test_new_log_entry_group_ids_are_unique() {
        let a = new_log_entry_group();
        let b = new_log_entry_group();
        assert_eq!(a.name, LOG_ENTRY_GROUP);
        assert_ne!(
            log_entry_group_id(std::slice::from_ref(&a)),
            log_entry_group_id(std::slice::from_ref(&b))
        );
    }

    #[test]
    fn test_has_only_log_entry_group() {
        assert!(!has_only_log_entry_group(&[]));

        let group = group_property("myLogEntryGroupId");
        assert!(has_only_log_entry_group(std::slice::from_ref(&group)));

        let other = Property {
            name: "foo".to_string(),
            attributes: vec![Attribute {
                name: "id".to_string(),
                value: "x".to_string(),
            }],
        };
        assert!(!has_only_log_entry_group(&[group.clone(), other.clone()]));
        assert!(!has_only_log_entry_group(&[other]));
    }
}
