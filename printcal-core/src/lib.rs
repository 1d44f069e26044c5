//! Core engine for the printcal calendar.
//!
//! This crate assembles a month's grid geometry with events from three
//! independently-sourced streams (site activities, admin-curated custom
//! events, member-private notes) into a single positional structure that
//! both the terminal view and the printable export consume:
//!
//! - `month` / `grid` for calendar geometry
//! - `normalize` / `aggregate` / `filter` for the event pipeline
//! - `populate` for the core merge
//! - `note` for the remote note lifecycle
//! - `view` for the navigation state that drives it all
//! - `export` for the printable-document wire contract

pub mod aggregate;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod grid;
pub mod month;
pub mod normalize;
pub mod note;
pub mod populate;
pub mod view;

pub use error::{CalendarError, CalendarResult};
// Re-export the event types at crate root for convenience
pub use event::*;
pub use month::ViewMonth;
