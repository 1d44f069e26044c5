use anyhow::Result;
use chrono::Datelike;
use owo_colors::OwoColorize;

use printcal_core::month::{ViewMonth, parse_iso_date};
use printcal_core::note::NoteAction;
use printcal_core::view::CalendarView;

use crate::client::Client;
use crate::config::GlobalConfig;
use crate::render::create_spinner;

pub async fn run(config: &GlobalConfig, date: &str, text: &str) -> Result<()> {
    let site = config.require_site()?;
    config.require_nonce()?;

    let date = parse_iso_date(date)?;
    let client = Client::new(site, config.rest_nonce.clone());

    // The existing remote record for this date decides create vs update
    // vs delete.
    let spinner = create_spinner("Checking existing note".to_string());
    let result = client.fetch_calendar().await;
    spinner.finish_and_clear();

    let mut view = CalendarView::new(ViewMonth::new(date.year(), date.month0()));
    let generation = view.begin_fetch();
    view.complete_fetch(generation, result?);
    let existing = view.note(date).and_then(|n| n.remote_id);

    let outcome = client.save_note(date, text, existing).await?;
    view.apply_note_saved(date, text, outcome.remote_id);

    match outcome.action {
        NoteAction::Create => println!(
            "{} note for {} (id {})",
            "Created".green(),
            date,
            outcome.remote_id.unwrap_or_default()
        ),
        NoteAction::Update => println!("{} note for {}", "Updated".yellow(), date),
        NoteAction::Delete => println!("{} note for {}", "Deleted".red(), date),
        NoteAction::Noop => println!(
            "{}",
            "Nothing to save (no note exists for that date)".dimmed()
        ),
    }

    Ok(())
}
