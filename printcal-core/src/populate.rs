//! The core merge: grid geometry joined with aggregated events.

use chrono::NaiveDate;

use crate::aggregate::EventsByDate;
use crate::grid::GridLayout;

/// One fully-resolved grid slot: the day number for in-month cells and the
/// newline-joined labels for that day. One structured record per index —
/// day numbers and labels can't drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedCell {
    pub day_of_month: Option<u32>,
    pub label: String,
}

/// Everything a renderer (terminal, HTML, or the remote document service)
/// needs to draw one month. Recomputed on every view change, never cached.
#[derive(Debug, Clone)]
pub struct PopulatedGrid {
    pub month_name: String,
    pub year: i32,
    pub first_weekday: u32,
    pub row_count: usize,
    pub cells: Vec<PopulatedCell>,
    pub bg_image: String,
    pub font_size_px: u32,
    /// Last day of the month; the export service uses it as a versioning
    /// field.
    pub as_of: NaiveDate,
}

/// Merge a month layout with its per-date labels. Total: every cell index
/// gets a defined entry, and days without events get an empty label.
pub fn populate(
    layout: &GridLayout,
    events: &EventsByDate,
    bg_image: &str,
    font_size_px: u32,
) -> PopulatedGrid {
    let month = layout.month;

    let cells = layout
        .cells
        .iter()
        .map(|cell| {
            let label = cell
                .day_of_month
                .and_then(|day| month.date(day))
                .and_then(|date| events.get(&date))
                .map(|labels| labels.join("\n"))
                .unwrap_or_default();
            PopulatedCell {
                day_of_month: cell.day_of_month,
                label,
            }
        })
        .collect();

    PopulatedGrid {
        month_name: month.name().to_string(),
        year: month.year(),
        first_weekday: layout.first_weekday,
        row_count: layout.row_count,
        cells,
        bg_image: bg_image.to_string(),
        font_size_px,
        as_of: month.last_day(),
    }
}
