//! Export contract: the fixed-geometry printable-document payload.
//!
//! Whatever renders the document (the remote generation service or a local
//! HTML realization) consumes the same `PopulatedGrid`; this module owns
//! the page geometry and the legacy key-per-slot wire encoding the remote
//! renderer expects.

use serde_json::{Map, Value, json};

use crate::grid::{GRID_COLUMNS, MAX_GRID_ROWS};
use crate::populate::PopulatedGrid;

/// Logical page size of the printable document (A4 landscape).
pub const PAGE_WIDTH: u32 = 1080;
pub const PAGE_HEIGHT: u32 = 794;

/// The wire always carries a full 6-row grid's worth of slots, even when
/// the month only needs 5 rows; the renderer allocates the keys up front.
pub const WIRE_SLOTS: usize = MAX_GRID_ROWS * GRID_COLUMNS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Word,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
        }
    }
}

/// Encode a populated grid as the document service's request body.
///
/// The renderer's key families have different bases: `day1..day42` hold
/// day numbers under 1-based keys, `event0..event41` hold label blobs
/// under 0-based keys, so day `d`'s number travels in
/// `day{first_weekday + d}` and its labels in `event{first_weekday + d - 1}`.
/// Both are derived from the one `cells` array. Unoccupied slots carry
/// empty strings.
pub fn wire_payload(grid: &PopulatedGrid) -> Value {
    let mut body = Map::new();
    body.insert("month".into(), json!(grid.month_name));
    body.insert("year".into(), json!(grid.year));

    for slot in 0..WIRE_SLOTS {
        let cell = grid.cells.get(slot);
        let day = cell.and_then(|c| c.day_of_month);
        body.insert(
            format!("day{}", slot + 1),
            day.map(|d| json!(d)).unwrap_or_else(|| json!("")),
        );
        body.insert(
            format!("event{slot}"),
            json!(cell.map(|c| c.label.as_str()).unwrap_or("")),
        );
    }

    body.insert("bg_image".into(), json!(grid.bg_image));
    body.insert("date".into(), json!(grid.as_of.format("%Y-%m-%d").to_string()));
    body.insert("fontSize".into(), json!(format!("{}px", grid.font_size_px)));

    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EventsByDate;
    use crate::grid::compute_grid;
    use crate::month::ViewMonth;
    use crate::populate::populate;

    fn july_grid() -> PopulatedGrid {
        let month = ViewMonth::new(2025, 6);
        let mut events = EventsByDate::new();
        events.insert(month.date(1).unwrap(), vec!["Bingo".to_string()]);
        events.insert(
            month.date(31).unwrap(),
            vec!["Fireworks".to_string(), "call Sam".to_string()],
        );
        populate(&compute_grid(month), &events, "uploads/bg.png", 14)
    }

    #[test]
    fn wire_keys_follow_both_index_bases() {
        let wire = wire_payload(&july_grid());
        let body = wire.as_object().unwrap();

        // July 2025 starts on a Tuesday: day 1 occupies cell 2, so its
        // number is under day3 and its labels under event2.
        assert_eq!(body["day3"], json!(1));
        assert_eq!(body["event2"], json!("Bingo"));
        assert_eq!(body["day33"], json!(31));
        assert_eq!(body["event32"], json!("Fireworks\ncall Sam"));

        // Padding before the month and the unused 6th row stay empty.
        assert_eq!(body["day1"], json!(""));
        assert_eq!(body["event0"], json!(""));
        assert_eq!(body["day42"], json!(""));
        assert_eq!(body["event41"], json!(""));
    }

    #[test]
    fn wire_carries_presentation_metadata() {
        let wire = wire_payload(&july_grid());
        let body = wire.as_object().unwrap();

        assert_eq!(body["month"], json!("July"));
        assert_eq!(body["year"], json!(2025));
        assert_eq!(body["bg_image"], json!("uploads/bg.png"));
        assert_eq!(body["date"], json!("2025-07-31"));
        assert_eq!(body["fontSize"], json!("14px"));
    }

    #[test]
    fn wire_always_has_42_slot_pairs() {
        let wire = wire_payload(&july_grid());
        let body = wire.as_object().unwrap();

        for slot in 0..WIRE_SLOTS {
            assert!(body.contains_key(&format!("day{}", slot + 1)));
            assert!(body.contains_key(&format!("event{slot}")));
        }
    }

    #[test]
    fn wire_round_trips_day_numbers_and_label_groups() {
        let grid = july_grid();
        let wire = wire_payload(&grid);
        let body = wire.as_object().unwrap();

        for slot in 0..WIRE_SLOTS {
            let day = body[&format!("day{}", slot + 1)].as_u64();
            let label = body[&format!("event{slot}")].as_str().unwrap();
            let cell = grid.cells.get(slot);

            assert_eq!(day, cell.and_then(|c| c.day_of_month).map(u64::from));
            assert_eq!(label, cell.map(|c| c.label.as_str()).unwrap_or(""));
        }
    }
}
