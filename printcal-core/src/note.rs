//! Note lifecycle: deriving remote intent from local state transitions.

use chrono::NaiveDate;

/// A member's per-day note as tracked locally. `remote_id` is present once
/// the remote store has a record for this date; a date with no record and
/// empty text is not tracked at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub date: NaiveDate,
    pub text: String,
    pub remote_id: Option<u64>,
}

/// What a save should do against the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Create,
    Update,
    Delete,
    Noop,
}

/// Derive the remote intent for saving `text` on a date whose current
/// remote record (if any) is `existing_remote_id`. Whitespace-only text
/// counts as empty.
pub fn plan_save(existing_remote_id: Option<u64>, text: &str) -> NoteAction {
    let empty = text.trim().is_empty();
    match (existing_remote_id, empty) {
        (None, false) => NoteAction::Create,
        (None, true) => NoteAction::Noop,
        (Some(_), false) => NoteAction::Update,
        (Some(_), true) => NoteAction::Delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_nonempty_save_creates() {
        assert_eq!(plan_save(None, "hello"), NoteAction::Create);
    }

    #[test]
    fn empty_save_on_untracked_date_is_a_noop() {
        assert_eq!(plan_save(None, ""), NoteAction::Noop);
        assert_eq!(plan_save(None, "   "), NoteAction::Noop);
    }

    #[test]
    fn nonempty_save_on_tracked_date_updates() {
        assert_eq!(plan_save(Some(7), "hello again"), NoteAction::Update);
    }

    #[test]
    fn empty_save_on_tracked_date_deletes() {
        assert_eq!(plan_save(Some(7), ""), NoteAction::Delete);
        assert_eq!(plan_save(Some(7), " \n"), NoteAction::Delete);
    }
}
