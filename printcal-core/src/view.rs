//! The view controller: navigation position, filters, notes, and the
//! assembly pipeline that turns them into a `PopulatedGrid`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregate::aggregate;
use crate::event::{CalendarPayload, NormalizedEvent, SourceKind};
use crate::filter::{FilterBucket, FilterSet};
use crate::grid::compute_grid;
use crate::month::ViewMonth;
use crate::normalize::{coerce_iso_date, normalize_activity, normalize_custom_event};
use crate::note::NoteRecord;
use crate::populate::{PopulatedGrid, populate};

pub const DEFAULT_FONT_SIZE_PX: u32 = 14;

/// Single source of truth for which month is displayed or exported, and
/// the state that feeds the grid: filters, font size, background, and the
/// member's notes.
#[derive(Debug)]
pub struct CalendarView {
    month: ViewMonth,
    filters: FilterSet,
    font_size_px: u32,
    bg_image: String,
    payload: CalendarPayload,
    notes: BTreeMap<NaiveDate, NoteRecord>,
    fetch_generation: u64,
}

impl CalendarView {
    pub fn new(month: ViewMonth) -> Self {
        CalendarView {
            month,
            filters: FilterSet::default(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            bg_image: String::new(),
            payload: CalendarPayload::default(),
            notes: BTreeMap::new(),
            fetch_generation: 0,
        }
    }

    pub fn month(&self) -> ViewMonth {
        self.month
    }

    pub fn go_to(&mut self, month: ViewMonth) {
        self.month = month;
    }

    pub fn go_next(&mut self) {
        self.month = self.month.next();
    }

    pub fn go_prev(&mut self) {
        self.month = self.month.prev();
    }

    pub fn set_font_size(&mut self, px: u32) {
        self.font_size_px = px;
    }

    pub fn set_bg_image(&mut self, path: impl Into<String>) {
        self.bg_image = path.into();
    }

    pub fn toggle_filter(&mut self, bucket: FilterBucket) {
        self.filters.toggle(bucket);
    }

    pub fn hide_filter(&mut self, bucket: FilterBucket) {
        self.filters.hide(bucket);
    }

    /// Start a fetch; the returned generation must be handed back to
    /// `complete_fetch`. Starting a newer fetch invalidates all earlier
    /// ones (last writer wins).
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.fetch_generation
    }

    /// Ingest a fetched payload. Returns `false` (and changes nothing)
    /// when a newer fetch has started since `generation` was issued.
    pub fn complete_fetch(&mut self, generation: u64, payload: CalendarPayload) -> bool {
        if generation != self.fetch_generation {
            return false;
        }

        if let Some(bg) = &payload.calendar_bg {
            self.bg_image = bg.clone();
        }

        // Notes get their own lifecycle map; all months are kept so
        // navigation doesn't lose them.
        self.notes = payload
            .member_events
            .iter()
            .filter_map(|raw| {
                let date = coerce_iso_date(raw.date.as_deref()?)?;
                let id = raw.id?;
                Some((
                    date,
                    NoteRecord {
                        date,
                        text: raw.title.clone().unwrap_or_default(),
                        remote_id: Some(id),
                    },
                ))
            })
            .collect();

        self.payload = payload;
        true
    }

    pub fn note(&self, date: NaiveDate) -> Option<&NoteRecord> {
        self.notes.get(&date)
    }

    /// Record the outcome of a remote note save. Callers invoke this only
    /// after the remote call succeeded; a failed save leaves the map at
    /// its last-known-good state.
    pub fn apply_note_saved(&mut self, date: NaiveDate, text: &str, remote_id: Option<u64>) {
        match remote_id {
            Some(id) => {
                self.notes.insert(
                    date,
                    NoteRecord {
                        date,
                        text: text.to_string(),
                        remote_id: Some(id),
                    },
                );
            }
            None => {
                self.notes.remove(&date);
            }
        }
    }

    /// Normalized, filtered event stream for the current month. Notes come
    /// from the lifecycle map rather than the raw payload, so edits made
    /// since the fetch are reflected.
    fn visible_events(&self) -> Vec<NormalizedEvent> {
        let mut events = Vec::new();
        for raw in &self.payload.activities {
            if let Some(ev) = normalize_activity(raw) {
                events.push(ev);
            }
        }
        for raw in &self.payload.calendar_custom_events {
            if let Some(ev) = normalize_custom_event(raw) {
                events.push(ev);
            }
        }

        let mut events = self.filters.apply(&events);

        for note in self.notes.values() {
            if self.month.contains(note.date) && !note.text.trim().is_empty() {
                events.push(NormalizedEvent {
                    date: note.date,
                    label: note.text.clone(),
                    kind: SourceKind::Note,
                    color: SourceKind::Note.default_color().to_string(),
                    category: None,
                });
            }
        }

        events
    }

    /// Assemble the month: normalize, filter, aggregate, lay out, merge.
    pub fn populated_grid(&self) -> PopulatedGrid {
        let events = self.visible_events();
        let by_date = aggregate(&events);
        let layout = compute_grid(self.month);
        populate(&layout, &by_date, &self.bg_image, self.font_size_px)
    }
}
