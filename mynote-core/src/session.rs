//! Applies user intents to the document and records them in history.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::error::TransferError;
use crate::history::History;
use crate::model::{Page, Snapshot};
use crate::transfer;

/// One user action against the document
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Start over with a single blank page
    AddPage,
    AddNote,
    /// Attach an image payload (normally a data URL) to the active page
    AddImage(String),
    EditNoteText { note_id: Uuid, text: String },
    /// Replace the whole document, e.g. after reading a pages file
    LoadSnapshot(Snapshot),
    Undo,
    Redo,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddPage => "add page",
            Intent::AddNote => "add note",
            Intent::AddImage(_) => "add image",
            Intent::EditNoteText { .. } => "edit note",
            Intent::LoadSnapshot(_) => "load",
            Intent::Undo => "undo",
            Intent::Redo => "redo",
        }
    }

    fn needs_active_page(&self) -> bool {
        matches!(
            self,
            Intent::AddNote | Intent::AddImage(_) | Intent::EditNoteText { .. }
        )
    }
}

/// What `EditSession::apply` did with an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new snapshot was committed
    Committed,
    /// Undo or redo moved the history cursor
    Moved,
    /// Nothing to do: a history boundary, or an edit whose target is gone.
    /// The history is left untouched (no commit, cursor unmoved).
    Unchanged,
    /// The intent needs an active page and there is none
    Rejected,
}

/// What a frontend needs to draw the document and its controls
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// The active page, if it exists in the current snapshot
    pub page: Option<&'a Page>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_add_note: bool,
    pub can_add_image: bool,
}

/// Owns the history and the active page pointer. All document changes go
/// through `apply`.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    history: History,
    active_page: Option<Uuid>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, intent: Intent) -> Outcome {
        if intent.needs_active_page() && self.active_page.is_none() {
            warn!("session: {} rejected, no active page", intent.name());
            return Outcome::Rejected;
        }

        match intent {
            Intent::Undo => {
                if !self.history.can_undo() {
                    return Outcome::Unchanged;
                }
                self.history.undo();
                Outcome::Moved
            }
            Intent::Redo => {
                if !self.history.can_redo() {
                    return Outcome::Unchanged;
                }
                self.history.redo();
                Outcome::Moved
            }
            Intent::AddPage => {
                let page = Page::new();
                info!("session: new page {}", page.id);
                self.replace_document(Snapshot::new(vec![page]))
            }
            Intent::LoadSnapshot(snapshot) => {
                info!("session: loaded document with {} page(s)", snapshot.len());
                self.replace_document(snapshot)
            }
            Intent::AddNote => self.edit_active_page(|current, page_id| current.add_note_to(page_id)),
            Intent::AddImage(data) => {
                self.edit_active_page(|current, page_id| current.add_image_to(page_id, data))
            }
            Intent::EditNoteText { note_id, text } => self.edit_active_page(|current, page_id| {
                current.update_note_text(page_id, note_id, &text)
            }),
        }
    }

    /// Parse a pages file and load it. A malformed file leaves the document
    /// and its history untouched.
    pub fn import(&mut self, content: &str) -> Result<Outcome, TransferError> {
        let snapshot = transfer::from_json(content)?;
        Ok(self.apply(Intent::LoadSnapshot(snapshot)))
    }

    pub fn export(&self) -> Result<String, TransferError> {
        transfer::to_json(self.current())
    }

    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn active_page_id(&self) -> Option<Uuid> {
        self.active_page
    }

    /// The active page as it exists in the current snapshot. After undoing
    /// past a page's creation the pointer no longer resolves.
    pub fn active_page(&self) -> Option<&Page> {
        self.active_page.and_then(|id| self.current().page(id))
    }

    pub fn view(&self) -> View<'_> {
        let has_active = self.active_page.is_some();
        View {
            page: self.active_page(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            can_add_note: has_active,
            can_add_image: has_active,
        }
    }

    fn replace_document(&mut self, snapshot: Snapshot) -> Outcome {
        self.active_page = snapshot.first_page_id();
        self.history.commit(snapshot);
        Outcome::Committed
    }

    fn edit_active_page<F>(&mut self, edit: F) -> Outcome
    where
        F: FnOnce(&Snapshot, Uuid) -> Snapshot,
    {
        let Some(page_id) = self.active_page else {
            return Outcome::Rejected;
        };
        let current = self.history.current();
        let next = edit(current, page_id);
        if next == *current {
            debug!("session: edit on page {} changed nothing", page_id);
            return Outcome::Unchanged;
        }
        self.history.commit(next);
        Outcome::Committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_page_sets_active_page() {
        let mut session = EditSession::new();
        assert_eq!(session.apply(Intent::AddPage), Outcome::Committed);

        let page_id = session.active_page_id().unwrap();
        assert_eq!(session.current().first_page_id(), Some(page_id));
        assert_eq!(session.current().len(), 1);
    }

    #[test]
    fn test_add_page_replaces_existing_pages() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        session.apply(Intent::AddNote);
        let old = session.active_page_id();

        session.apply(Intent::AddPage);

        assert_eq!(session.current().len(), 1);
        assert_ne!(session.active_page_id(), old);
        assert!(session.active_page().unwrap().is_blank());
    }

    #[test]
    fn test_edits_without_page_are_rejected() {
        let mut session = EditSession::new();
        assert_eq!(session.apply(Intent::AddNote), Outcome::Rejected);
        assert_eq!(session.apply(Intent::AddImage("x".into())), Outcome::Rejected);
        assert_eq!(
            session.apply(Intent::EditNoteText { note_id: Uuid::new_v4(), text: "x".into() }),
            Outcome::Rejected
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_unknown_note_is_not_committed() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        let len = session.history().len();

        let outcome = session.apply(Intent::EditNoteText { note_id: Uuid::new_v4(), text: "x".into() });

        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_unchanged_leaves_history_untouched() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        session.apply(Intent::AddNote);
        let note_id = session.active_page().unwrap().notes[0].id;
        let len = session.history().len();
        let cursor = session.history().cursor();

        let outcomes = [
            session.apply(Intent::Redo),
            session.apply(Intent::EditNoteText { note_id, text: String::new() }),
            session.apply(Intent::EditNoteText { note_id: Uuid::new_v4(), text: "x".into() }),
        ];

        assert!(outcomes.iter().all(|o| *o == Outcome::Unchanged));
        assert_eq!(session.history().len(), len);
        assert_eq!(session.history().cursor(), cursor);
        assert!(session.history().can_undo());
        assert!(!session.history().can_redo());
    }

    #[test]
    fn test_undo_keeps_pointer_but_page_disappears() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        let page_id = session.active_page_id();

        assert_eq!(session.apply(Intent::Undo), Outcome::Moved);
        assert_eq!(session.active_page_id(), page_id);
        assert!(session.active_page().is_none());
        assert!(session.view().page.is_none());

        assert_eq!(session.apply(Intent::AddNote), Outcome::Unchanged);
        assert_eq!(session.apply(Intent::Redo), Outcome::Moved);
        assert!(session.active_page().is_some());
    }

    #[test]
    fn test_undo_redo_at_boundaries() {
        let mut session = EditSession::new();
        assert_eq!(session.apply(Intent::Undo), Outcome::Unchanged);
        assert_eq!(session.apply(Intent::Redo), Outcome::Unchanged);

        session.apply(Intent::AddPage);
        assert_eq!(session.apply(Intent::Redo), Outcome::Unchanged);
    }

    #[test]
    fn test_view_flags() {
        let mut session = EditSession::new();
        let view = session.view();
        assert!(!view.can_undo && !view.can_redo && !view.can_add_note && !view.can_add_image);

        session.apply(Intent::AddPage);
        let view = session.view();
        assert!(view.can_undo && !view.can_redo && view.can_add_note && view.can_add_image);

        session.apply(Intent::Undo);
        let view = session.view();
        assert!(!view.can_undo && view.can_redo);
    }

    #[test]
    fn test_import_failure_leaves_document() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        session.apply(Intent::AddNote);
        let before = session.current().clone();
        let len = session.history().len();

        assert!(session.import("[{\"notes\": 3}]").is_err());

        assert_eq!(session.current(), &before);
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_import_selects_first_page() {
        let mut session = EditSession::new();
        let outcome = session
            .import(r#"[{"notes": [{"text": "kept"}]}, {"notes": []}]"#)
            .unwrap();

        assert_eq!(outcome, Outcome::Committed);
        let page = session.active_page().unwrap();
        assert_eq!(page.notes[0].text, "kept");
        assert_eq!(session.current().len(), 2);
    }

    #[test]
    fn test_loading_empty_document_clears_pointer() {
        let mut session = EditSession::new();
        session.apply(Intent::AddPage);
        session.apply(Intent::LoadSnapshot(Snapshot::default()));

        assert_eq!(session.active_page_id(), None);
        assert!(!session.view().can_add_note);
    }
}
