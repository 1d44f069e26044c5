//! Month geometry: which grid cell holds which day.

use crate::month::ViewMonth;

pub const GRID_COLUMNS: usize = 7;

/// Grids never drop below 5 rows, so short months keep the same printed
/// row height as their neighbors.
pub const MIN_GRID_ROWS: usize = 5;
pub const MAX_GRID_ROWS: usize = 6;

/// One slot in the month grid. `day_of_month` is `None` for padding cells
/// outside the displayed month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub day_of_month: Option<u32>,
}

/// The canonical cell layout for one month: `row_count * 7` cells, with
/// day `d` at index `first_weekday + d - 1` and padding everywhere else.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub month: ViewMonth,
    pub first_weekday: u32,
    pub row_count: usize,
    pub cells: Vec<GridCell>,
}

/// Lay out a month. Every index in `0..row_count * 7` gets a cell.
pub fn compute_grid(month: ViewMonth) -> GridLayout {
    let first_weekday = month.first_weekday();
    let days = month.days_in_month();
    let needed = (first_weekday + days) as usize;
    let row_count = needed.div_ceil(GRID_COLUMNS).max(MIN_GRID_ROWS);

    let cells = (0..row_count * GRID_COLUMNS)
        .map(|index| {
            let day = index as i64 - first_weekday as i64 + 1;
            GridCell {
                index,
                day_of_month: (1..=days as i64).contains(&day).then_some(day as u32),
            }
        })
        .collect();

    GridLayout {
        month,
        first_weekday,
        row_count,
        cells,
    }
}

impl GridLayout {
    /// Cell index holding a given 1-based day number.
    pub fn cell_for_day(&self, day: u32) -> usize {
        (self.first_weekday + day - 1) as usize
    }

    pub fn day_at(&self, index: usize) -> Option<u32> {
        self.cells.get(index).and_then(|c| c.day_of_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn july_2025_layout() {
        // July 2025 starts on a Tuesday and has 31 days: ceil((2+31)/7) = 5.
        let layout = compute_grid(ViewMonth::new(2025, 6));
        assert_eq!(layout.first_weekday, 2);
        assert_eq!(layout.row_count, 5);
        assert_eq!(layout.cells.len(), 35);
        assert_eq!(layout.day_at(2), Some(1));
        assert_eq!(layout.day_at(32), Some(31));
        assert_eq!(layout.cell_for_day(1), 2);
        assert_eq!(layout.cell_for_day(31), 32);
    }

    #[test]
    fn saturday_start_31_day_month_needs_six_rows() {
        // August 2026 starts on a Saturday: ceil((6+31)/7) = 6.
        let layout = compute_grid(ViewMonth::new(2026, 7));
        assert_eq!(layout.first_weekday, 6);
        assert_eq!(layout.row_count, 6);
        assert_eq!(layout.cells.len(), 42);
        assert_eq!(layout.day_at(6), Some(1));
        assert_eq!(layout.day_at(36), Some(31));
    }

    #[test]
    fn short_month_floors_at_five_rows() {
        // February 2026 starts on a Sunday with 28 days: 4 rows would fit,
        // but the layout floors at 5.
        let layout = compute_grid(ViewMonth::new(2026, 1));
        assert_eq!(layout.first_weekday, 0);
        assert_eq!(layout.row_count, 5);
        assert_eq!(layout.cells.len(), 35);
        assert_eq!(layout.day_at(0), Some(1));
        assert_eq!(layout.day_at(27), Some(28));
        for index in 28..35 {
            assert_eq!(layout.day_at(index), None);
        }
    }

    #[test]
    fn every_month_has_consecutive_days_from_first_weekday() {
        let months = [
            ViewMonth::new(2024, 1),  // leap February
            ViewMonth::new(2025, 0),
            ViewMonth::new(2025, 6),
            ViewMonth::new(2025, 11),
            ViewMonth::new(2026, 1),
            ViewMonth::new(2026, 7),
        ];

        for month in months {
            let layout = compute_grid(month);
            let days: Vec<u32> = layout.cells.iter().filter_map(|c| c.day_of_month).collect();

            assert_eq!(days.len(), month.days_in_month() as usize, "{month}");
            assert_eq!(days, (1..=month.days_in_month()).collect::<Vec<_>>(), "{month}");
            assert_eq!(layout.day_at(layout.first_weekday as usize), Some(1), "{month}");
            assert!(layout.row_count >= MIN_GRID_ROWS && layout.row_count <= MAX_GRID_ROWS);

            // Padding before day 1 and after the last day.
            for index in 0..layout.first_weekday as usize {
                assert_eq!(layout.day_at(index), None, "{month}");
            }
        }
    }
}
