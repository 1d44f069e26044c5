//! Upstream payload model and normalized events.
//!
//! Upstream records arrive as loosely-shaped JSON from the member site.
//! Every field is optional here; the normalization boundary decides which
//! records survive.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CalendarResult;

/// Response body of the site's calendar search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarPayload {
    #[serde(default)]
    pub activities: Vec<RawActivity>,
    #[serde(default)]
    pub calendar_custom_events: Vec<RawCustomEvent>,
    #[serde(default)]
    pub member_events: Vec<RawMemberEvent>,
    /// Currently stored background theme, if the member picked one.
    #[serde(default)]
    pub calendar_bg: Option<String>,
}

impl CalendarPayload {
    pub fn from_json(body: &str) -> CalendarResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A site-wide scheduled activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    pub name: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub color: Option<String>,
}

/// An admin-curated custom event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCustomEvent {
    pub title: Option<String>,
    pub date: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

/// A member's private note, stored remotely as its own record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMemberEvent {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub date: Option<String>,
}

/// Which upstream stream a normalized event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Activity,
    Custom,
    Note,
}

impl SourceKind {
    /// Presentation color when the record doesn't carry its own.
    pub fn default_color(self) -> &'static str {
        match self {
            SourceKind::Activity => "blue",
            SourceKind::Custom => "orange",
            SourceKind::Note => "purple",
        }
    }
}

/// An upstream record reduced to the shape the aggregation engine works
/// with. Immutable after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub date: NaiveDate,
    pub label: String,
    pub kind: SourceKind,
    pub color: String,
    /// Custom events only; the filter bucket key.
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_tolerates_missing_sections() {
        let payload = CalendarPayload::from_json(r#"{"activities": []}"#).unwrap();
        assert!(payload.activities.is_empty());
        assert!(payload.calendar_custom_events.is_empty());
        assert!(payload.member_events.is_empty());
        assert!(payload.calendar_bg.is_none());
    }

    #[test]
    fn payload_tolerates_partial_records() {
        let payload = CalendarPayload::from_json(
            r#"{
                "activities": [{"name": "Bingo"}],
                "member_events": [{"id": 9}],
                "calendar_bg": "uploads/bg.png"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.activities[0].name.as_deref(), Some("Bingo"));
        assert!(payload.activities[0].date.is_none());
        assert_eq!(payload.member_events[0].id, Some(9));
        assert_eq!(payload.calendar_bg.as_deref(), Some("uploads/bg.png"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(CalendarPayload::from_json("not json").is_err());
    }
}
