//! Terminal rendering of the populated grid.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use printcal_core::grid::GRID_COLUMNS;
use printcal_core::populate::PopulatedGrid;

const WEEKDAY_HEADERS: [&str; GRID_COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Render a month as a compact grid. Days with entries are starred; the
/// entries themselves are listed below, one day per block.
pub fn render_grid(grid: &PopulatedGrid) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        grid.month_name.bold(),
        grid.year.to_string().bold()
    ));
    lines.push(String::new());
    lines.push(
        WEEKDAY_HEADERS
            .iter()
            .map(|d| format!("{d:>4}"))
            .collect::<Vec<_>>()
            .join(" "),
    );

    for row in 0..grid.row_count {
        let mut cols = Vec::new();
        for col in 0..GRID_COLUMNS {
            let cell = &grid.cells[row * GRID_COLUMNS + col];
            let text = match cell.day_of_month {
                Some(day) if !cell.label.is_empty() => format!("{:>3}{}", day, "*".yellow()),
                Some(day) => format!("{day:>3} "),
                None => format!("   {}", "·".dimmed()),
            };
            cols.push(text);
        }
        lines.push(cols.join(" "));
    }

    let mut wrote_heading = false;
    for cell in &grid.cells {
        if let Some(day) = cell.day_of_month {
            if cell.label.is_empty() {
                continue;
            }
            if !wrote_heading {
                lines.push(String::new());
                wrote_heading = true;
            }
            for (i, entry) in cell.label.lines().enumerate() {
                if i == 0 {
                    lines.push(format!("{day:>4}  {entry}"));
                } else {
                    lines.push(format!("      {entry}"));
                }
            }
        }
    }

    lines.join("\n")
}
