//! Normalization boundary: raw upstream records become `NormalizedEvent`s.
//!
//! Upstream data is not fully trusted. Records with missing or malformed
//! dates or blank labels are dropped one at a time; a bad record never
//! aborts the rest of its source, and a bad source never aborts the other
//! sources.

use chrono::NaiveDate;

use crate::event::{
    CalendarPayload, NormalizedEvent, RawActivity, RawCustomEvent, RawMemberEvent, SourceKind,
};
use crate::filter::DEFAULT_CATEGORY;
use crate::month::ViewMonth;

/// Resolve the two upstream date encodings (`YYYY/MM/DD` and `YYYYMMDD`)
/// into a real calendar date. Anything unparseable is dropped.
pub fn coerce_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let dashed = if raw.contains('/') {
        raw.replace('/', "-")
    } else if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8])
    } else {
        raw.to_string()
    };

    NaiveDate::parse_from_str(&dashed, "%Y-%m-%d").ok()
}

fn clean_label(label: Option<&str>) -> Option<String> {
    let label = label?.trim();
    (!label.is_empty()).then(|| label.to_string())
}

pub fn normalize_activity(raw: &RawActivity) -> Option<NormalizedEvent> {
    let date = coerce_iso_date(raw.date.as_deref()?)?;
    let label = clean_label(raw.name.as_deref())?;

    Some(NormalizedEvent {
        date,
        label,
        kind: SourceKind::Activity,
        color: raw
            .color
            .clone()
            .unwrap_or_else(|| SourceKind::Activity.default_color().to_string()),
        category: None,
    })
}

pub fn normalize_custom_event(raw: &RawCustomEvent) -> Option<NormalizedEvent> {
    let date = coerce_iso_date(raw.date.as_deref()?)?;
    let label = clean_label(raw.title.as_deref())?;

    Some(NormalizedEvent {
        date,
        label,
        kind: SourceKind::Custom,
        color: raw
            .color
            .clone()
            .unwrap_or_else(|| SourceKind::Custom.default_color().to_string()),
        category: Some(
            raw.category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
        ),
    })
}

/// Notes only join the aggregation for the month they belong to; notes for
/// other months stay stored remotely for their own month's view.
pub fn normalize_note(raw: &RawMemberEvent, view: ViewMonth) -> Option<NormalizedEvent> {
    let date = coerce_iso_date(raw.date.as_deref()?)?;
    if !view.contains(date) {
        return None;
    }
    let label = clean_label(raw.title.as_deref())?;

    Some(NormalizedEvent {
        date,
        label,
        kind: SourceKind::Note,
        color: SourceKind::Note.default_color().to_string(),
        category: None,
    })
}

/// Normalize a whole payload for one view month, in upstream arrival
/// order: activities, then custom events, then notes.
pub fn normalize_payload(payload: &CalendarPayload, view: ViewMonth) -> Vec<NormalizedEvent> {
    let mut events = Vec::new();

    for raw in &payload.activities {
        match normalize_activity(raw) {
            Some(ev) => events.push(ev),
            None => log::debug!("dropping malformed activity: {raw:?}"),
        }
    }

    for raw in &payload.calendar_custom_events {
        match normalize_custom_event(raw) {
            Some(ev) => events.push(ev),
            None => log::debug!("dropping malformed custom event: {raw:?}"),
        }
    }

    events.extend(
        payload
            .member_events
            .iter()
            .filter_map(|raw| normalize_note(raw, view)),
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn coerces_slash_and_compact_encodings() {
        assert_eq!(coerce_iso_date("2025/07/03"), Some(date(2025, 7, 3)));
        assert_eq!(coerce_iso_date("20250703"), Some(date(2025, 7, 3)));
        assert_eq!(coerce_iso_date("2025-07-03"), Some(date(2025, 7, 3)));
        // Unpadded slash dates appear upstream too.
        assert_eq!(coerce_iso_date("2025/7/3"), Some(date(2025, 7, 3)));
    }

    #[test]
    fn drops_empty_and_malformed_dates() {
        assert_eq!(coerce_iso_date(""), None);
        assert_eq!(coerce_iso_date("   "), None);
        assert_eq!(coerce_iso_date("tomorrow"), None);
        assert_eq!(coerce_iso_date("20251332"), None); // month 13
        assert_eq!(coerce_iso_date("2025/02/30"), None);
    }

    #[test]
    fn activity_keeps_own_color_or_defaults() {
        let with_color = RawActivity {
            name: Some("Bingo".into()),
            date: Some("2025/07/10".into()),
            link: None,
            color: Some("#336699".into()),
        };
        assert_eq!(normalize_activity(&with_color).unwrap().color, "#336699");

        let without_color = RawActivity {
            name: Some("Bingo".into()),
            date: Some("20250710".into()),
            link: None,
            color: None,
        };
        assert_eq!(normalize_activity(&without_color).unwrap().color, "blue");
    }

    #[test]
    fn records_without_date_or_label_are_dropped() {
        assert!(normalize_activity(&RawActivity::default()).is_none());
        assert!(
            normalize_activity(&RawActivity {
                name: Some("  ".into()),
                date: Some("2025/07/10".into()),
                ..Default::default()
            })
            .is_none()
        );
        assert!(
            normalize_custom_event(&RawCustomEvent {
                title: Some("Picnic".into()),
                date: Some("not a date".into()),
                ..Default::default()
            })
            .is_none()
        );
    }

    #[test]
    fn custom_event_category_defaults_to_custom() {
        let raw = RawCustomEvent {
            title: Some("Picnic".into()),
            date: Some("2025/07/12".into()),
            color: None,
            category: None,
        };
        assert_eq!(normalize_custom_event(&raw).unwrap().category.as_deref(), Some("custom"));

        let named = RawCustomEvent {
            category: Some("reminders".into()),
            ..raw
        };
        assert_eq!(
            normalize_custom_event(&named).unwrap().category.as_deref(),
            Some("reminders")
        );
    }

    #[test]
    fn notes_outside_the_view_month_are_excluded() {
        let july = ViewMonth::new(2025, 6);
        let in_month = RawMemberEvent {
            id: Some(1),
            title: Some("dentist".into()),
            date: Some("2025/07/10".into()),
        };
        let other_month = RawMemberEvent {
            id: Some(2),
            title: Some("vacation".into()),
            date: Some("2025/08/02".into()),
        };

        assert!(normalize_note(&in_month, july).is_some());
        assert!(normalize_note(&other_month, july).is_none());
    }

    #[test]
    fn payload_normalization_isolates_bad_records_per_source() {
        let payload = CalendarPayload::from_json(
            r#"{
                "activities": [
                    {"name": "Bingo", "date": "2025/07/10"},
                    {"name": "Broken", "date": ""}
                ],
                "calendar_custom_events": [
                    {"title": "Broken too"},
                    {"title": "Picnic", "date": "20250712", "category": "outings"}
                ],
                "member_events": [
                    {"id": 5, "title": "dentist", "date": "2025/07/10"}
                ]
            }"#,
        )
        .unwrap();

        let events = normalize_payload(&payload, ViewMonth::new(2025, 6));
        let labels: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(labels, ["Bingo", "Picnic", "dentist"]);
        assert_eq!(events[0].kind, SourceKind::Activity);
        assert_eq!(events[1].kind, SourceKind::Custom);
        assert_eq!(events[2].kind, SourceKind::Note);
    }
}
