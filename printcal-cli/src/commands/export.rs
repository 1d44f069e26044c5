use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use printcal_core::export::ExportFormat;
use printcal_core::month::ViewMonth;
use printcal_core::view::CalendarView;

use crate::client::Client;
use crate::config::GlobalConfig;
use crate::html;
use crate::render::create_spinner;

pub struct ExportArgs {
    pub month: ViewMonth,
    pub format: ExportFormat,
    pub bg: Option<String>,
    pub font_size: Option<u32>,
    pub out: Option<PathBuf>,
    pub local: bool,
    pub open: bool,
}

pub async fn run(config: &GlobalConfig, args: ExportArgs) -> Result<()> {
    let site = config.require_site()?;
    let client = Client::new(site, config.rest_nonce.clone());

    let mut view = CalendarView::new(args.month);
    view.set_font_size(args.font_size.unwrap_or(config.font_size));

    let spinner = create_spinner(format!("Fetching {}", args.month));
    let generation = view.begin_fetch();
    let result = client.fetch_calendar().await;
    spinner.finish_and_clear();
    view.complete_fetch(generation, result?);

    // Explicit background beats the site's stored theme.
    if let Some(bg) = args.bg.as_ref().or(config.bg_image.as_ref()) {
        view.set_bg_image(bg.clone());
    }

    let grid = view.populated_grid();

    if args.local {
        let doc = html::generate_document(&grid, config.logo_url.as_deref());
        let out = args.out.unwrap_or_else(|| {
            PathBuf::from(format!("calendar-{}-{}.html", grid.month_name, grid.year))
        });
        std::fs::write(&out, doc).with_context(|| format!("Failed to write {}", out.display()))?;
        println!("Wrote {}", out.display().to_string().green());

        if args.open {
            open::that(&out).with_context(|| format!("Failed to open {}", out.display()))?;
        }
        return Ok(());
    }

    let spinner = create_spinner("Generating document".to_string());
    let result = client.export(&grid, args.format).await;
    spinner.finish_and_clear();
    let bytes = result?;

    let out = args.out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "calendar-{}-{}.{}",
            grid.month_name,
            grid.year,
            args.format.extension()
        ))
    });
    std::fs::write(&out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "Wrote {} ({} bytes)",
        out.display().to_string().green(),
        bytes.len()
    );

    if args.open {
        open::that(&out).with_context(|| format!("Failed to open {}", out.display()))?;
    }
    Ok(())
}
