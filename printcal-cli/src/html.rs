//! Local realization of the export formatter: a self-contained printable
//! HTML page with the same fixed geometry the remote renderer uses. Both
//! paths consume the same `PopulatedGrid`.

use printcal_core::export::{PAGE_HEIGHT, PAGE_WIDTH};
use printcal_core::grid::GRID_COLUMNS;
use printcal_core::populate::PopulatedGrid;

const WEEKDAY_HEADERS: [&str; GRID_COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render a populated grid as a printable HTML document.
pub fn generate_document(grid: &PopulatedGrid, logo_url: Option<&str>) -> String {
    let mut rows = String::new();
    for row in 0..grid.row_count {
        rows.push_str("<tr>");
        for col in 0..GRID_COLUMNS {
            rows.push_str(&render_cell(grid, row * GRID_COLUMNS + col));
        }
        rows.push_str("</tr>\n");
    }

    let header_cells: String = WEEKDAY_HEADERS
        .iter()
        .map(|d| format!("<th>{d}</th>"))
        .collect();

    let logo = logo_url
        .map(|url| format!(r#"<img src="{}" width="150" />"#, escape(url)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Calendar - {month} {year}</title>
  <style>
    html, body {{ margin: 0; padding: 0; width: 100%; height: 100%; }}
    @page {{ size: A4 landscape; margin: 0; }}
    #calendar {{
      width: {width}px; height: {height}px;
      margin: auto;
      background-image: url('{bg}');
      background-size: cover;
      background-position: center;
      font-family: sans-serif;
    }}
    #calendar-table {{
      width: 100%; height: 100%;
      border-spacing: 5px;
      table-layout: fixed;
    }}
    #calendar th {{
      text-align: center; padding: 10px;
      border-radius: 5px;
      background-color: #7e57c2; color: white;
    }}
    #calendar-table td {{
      text-align: left;
      padding: 10px;
      border-radius: 5px;
      vertical-align: top;
      height: calc(100% / {row_count});
    }}
    #calendar-table td:not(.outside) {{
      background: linear-gradient(to bottom right, #fff, #f2f2f2);
      color: #000;
    }}
    #calendar-table td.outside {{
      background-color: #f9f9f9;
      color: #aaa;
      opacity: 0.6;
    }}
    .date-number {{
      position: absolute;
      top: 2px;
      right: 2px;
      font-weight: bold;
      font-size: 14px;
    }}
    .event {{
      padding: 2px 4px;
      font-size: {font_size}px;
      margin-top: 6px;
    }}
    .cell-content {{
      position: relative;
      box-sizing: border-box;
      padding-top: 10px;
    }}
    #page-header {{
      text-align: center;
      padding: 10px;
    }}
    #month-year {{
      background: white;
      border-radius: 50px;
    }}
    #month-year h2 {{
      margin: 10px;
      color: #1C0D5A;
    }}
    .highlight {{
      color: #f76a0c;
    }}
  </style>
</head>
<body>
  <div id="calendar">
    <table id="page-header" style="width: 100%;">
      <tr>
        <td style="width: 25%"></td>
        <td id="month-year" colspan="5"><h2>{month} <span class="highlight">{year}</span> Calendar</h2></td>
        <td style="text-align: right; padding-right: 30px;">{logo}</td>
      </tr>
    </table>
    <table id="calendar-table">
      <thead id="calendar-header">
        <tr>{header_cells}</tr>
      </thead>
      <tbody>{rows}</tbody>
    </table>
  </div>
</body>
</html>"#,
        month = escape(&grid.month_name),
        year = grid.year,
        width = PAGE_WIDTH,
        height = PAGE_HEIGHT,
        bg = escape(&grid.bg_image),
        row_count = grid.row_count,
        font_size = grid.font_size_px,
        logo = logo,
        header_cells = header_cells,
        rows = rows,
    )
}

fn render_cell(grid: &PopulatedGrid, index: usize) -> String {
    let cell = &grid.cells[index];

    let (class, day) = match cell.day_of_month {
        Some(day) => ("", day.to_string()),
        None => (r#" class="outside""#, String::new()),
    };

    let events: String = cell
        .label
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!(r#"<div class="event">{}</div>"#, escape(line)))
        .collect();

    format!(
        r#"<td{class}><div class="cell-content"><div class="date-number">{day}</div>{events}</div></td>"#
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
