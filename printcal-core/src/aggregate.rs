//! Per-date event grouping.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::event::{NormalizedEvent, SourceKind};

/// Labels grouped by date. A `BTreeMap` keeps iteration deterministic,
/// which export reproducibility depends on; dates with no events have no
/// entry.
pub type EventsByDate = BTreeMap<NaiveDate, Vec<String>>;

/// Group labels by date. Within a date, activity and custom-event labels
/// keep their upstream order and the member's note always lands last. No
/// deduplication: a date with two same-titled events keeps both.
pub fn aggregate(events: &[NormalizedEvent]) -> EventsByDate {
    let mut by_date = EventsByDate::new();

    for ev in events.iter().filter(|e| e.kind != SourceKind::Note) {
        by_date.entry(ev.date).or_default().push(ev.label.clone());
    }
    for ev in events.iter().filter(|e| e.kind == SourceKind::Note) {
        by_date.entry(ev.date).or_default().push(ev.label.clone());
    }

    by_date
}
