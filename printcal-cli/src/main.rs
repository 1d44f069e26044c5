mod client;
mod commands;
mod config;
mod html;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};

use printcal_core::export::ExportFormat;
use printcal_core::month::ViewMonth;

use crate::config::GlobalConfig;

#[derive(Parser)]
#[command(name = "printcal")]
#[command(about = "View your member activities calendar, keep per-day notes, and export printable months")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month's calendar in the terminal
    Show {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Hide a filter bucket ("monthly" or a custom-event category); repeatable
        #[arg(long)]
        hide: Vec<String>,
    },
    /// Save, change, or clear the note for a date
    Note {
        /// Date the note belongs to (YYYY-MM-DD)
        date: String,

        /// Note text; omit (or pass "") to clear the note
        text: Option<String>,
    },
    /// Export a month as a printable document
    Export {
        /// Month to export (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format: pdf or word
        #[arg(short, long, default_value = "pdf")]
        format: String,

        /// Background image URL for the page
        #[arg(long)]
        bg: Option<String>,

        /// Event font size in pixels
        #[arg(long)]
        font_size: Option<u32>,

        /// Output file path
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Render locally to printable HTML instead of the remote service
        #[arg(long)]
        local: bool,

        /// Open the result when done
        #[arg(long)]
        open: bool,
    },
    /// Upload a background image for exported calendars
    Theme {
        /// Image file to upload
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    let cli = Cli::parse();
    let config = GlobalConfig::load()?;

    match cli.command {
        Commands::Show { month, hide } => {
            let month = resolve_month(month.as_deref())?;
            commands::show::run(&config, month, &hide).await
        }
        Commands::Note { date, text } => {
            commands::note::run(&config, &date, text.as_deref().unwrap_or("")).await
        }
        Commands::Export {
            month,
            format,
            bg,
            font_size,
            out,
            local,
            open,
        } => {
            let args = commands::export::ExportArgs {
                month: resolve_month(month.as_deref())?,
                format: parse_format(&format)?,
                bg,
                font_size,
                out,
                local,
                open,
            };
            commands::export::run(&config, args).await
        }
        Commands::Theme { image } => commands::theme::run(&config, &image).await,
    }
}

fn resolve_month(arg: Option<&str>) -> Result<ViewMonth> {
    match arg {
        Some(s) => Ok(ViewMonth::parse(s)?),
        None => {
            let today = chrono::Local::now().date_naive();
            Ok(ViewMonth::new(today.year(), today.month0()))
        }
    }
}

fn parse_format(s: &str) -> Result<ExportFormat> {
    match s.to_ascii_lowercase().as_str() {
        "pdf" => Ok(ExportFormat::Pdf),
        "word" | "docx" => Ok(ExportFormat::Word),
        other => anyhow::bail!("Unknown format '{}'. Expected pdf or word", other),
    }
}
