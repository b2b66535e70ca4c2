use uuid::Uuid;

use crate::error::TransferError;
use crate::model::{Note, Page};
use crate::session::{EditSession, Intent, Outcome, View};

/// Shown until the user does anything
pub const SLOGAN: &str = "Make it easier to take notes!";

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Help,
}

/// Input target for text input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NoteText,
    ImagePath,
    LoadPath,
}

/// Platform-agnostic application state
pub struct App {
    pub session: EditSession,
    pub mode: Mode,
    pub running: bool,
    pub show_slogan: bool,

    // Note list state
    pub note_selected: usize,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,
    editing_note: Option<Uuid>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: EditSession::new(),
            mode: Mode::Normal,
            running: true,
            show_slogan: true,

            note_selected: 0,

            input_buffer: String::new(),
            input_target: InputTarget::NoteText,
            editing_note: None,

            status_message: None,
        }
    }

    pub fn view(&self) -> View<'_> {
        self.session.view()
    }

    pub fn page(&self) -> Option<&Page> {
        self.session.active_page()
    }

    pub fn notes(&self) -> &[Note] {
        self.page().map(|p| p.notes.as_slice()).unwrap_or_default()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes().get(self.note_selected)
    }

    pub fn add_page(&mut self) {
        self.show_slogan = false;
        self.session.apply(Intent::AddPage);
        self.note_selected = 0;
        self.set_status("New page");
    }

    pub fn add_note(&mut self) -> bool {
        self.show_slogan = false;
        if !self.view().can_add_note {
            return false;
        }
        match self.session.apply(Intent::AddNote) {
            Outcome::Committed => {
                self.note_selected = self.notes().len().saturating_sub(1);
                self.set_status("Note added");
                true
            }
            _ => {
                self.set_status("No page to add a note to");
                false
            }
        }
    }

    /// Attach an image payload that has finished loading
    pub fn add_image(&mut self, data: String) -> bool {
        self.show_slogan = false;
        match self.session.apply(Intent::AddImage(data)) {
            Outcome::Committed => {
                self.set_status("Image added");
                true
            }
            _ => {
                self.set_status("No page to add an image to");
                false
            }
        }
    }

    pub fn undo(&mut self) {
        self.show_slogan = false;
        if self.session.apply(Intent::Undo) == Outcome::Moved {
            self.clamp_selection();
            self.set_status("Undone");
        }
    }

    pub fn redo(&mut self) {
        self.show_slogan = false;
        if self.session.apply(Intent::Redo) == Outcome::Moved {
            self.clamp_selection();
            self.set_status("Redone");
        }
    }

    /// Load a pages file. Errors are reported in the status bar and leave the
    /// document as it was.
    pub fn load_json(&mut self, content: &str) -> bool {
        self.show_slogan = false;
        match self.session.import(content) {
            Ok(_) => {
                self.note_selected = 0;
                let pages = self.session.current().len();
                self.set_status(&format!("Loaded {} page(s)", pages));
                true
            }
            Err(e) => {
                self.set_status(&format!("Load failed: {}", e));
                false
            }
        }
    }

    pub fn export_json(&mut self) -> Result<String, TransferError> {
        self.show_slogan = false;
        self.session.export()
    }

    /// Navigate to next note
    pub fn next_note(&mut self) {
        let count = self.notes().len();
        if count > 0 {
            self.note_selected = (self.note_selected + 1) % count;
        }
    }

    /// Navigate to previous note
    pub fn prev_note(&mut self) {
        let count = self.notes().len();
        if count > 0 {
            self.note_selected = if self.note_selected == 0 {
                count - 1
            } else {
                self.note_selected - 1
            };
        }
    }

    /// Open the selected note in the input buffer
    pub fn begin_note_edit(&mut self) -> bool {
        let Some((id, text)) = self.selected_note().map(|n| (n.id, n.text.clone())) else {
            return false;
        };
        self.editing_note = Some(id);
        self.input_buffer = text;
        self.input_target = InputTarget::NoteText;
        self.mode = Mode::Input;
        self.show_slogan = false;
        true
    }

    /// Prompt for a path or other free text
    pub fn begin_input(&mut self, target: InputTarget) {
        self.input_buffer.clear();
        self.input_target = target;
        self.mode = Mode::Input;
        self.show_slogan = false;
    }

    /// Write the input buffer back to the note being edited
    pub fn commit_note_edit(&mut self) -> bool {
        let Some(note_id) = self.editing_note.take() else {
            return false;
        };
        let text = std::mem::take(&mut self.input_buffer);
        self.mode = Mode::Normal;

        match self.session.apply(Intent::EditNoteText { note_id, text }) {
            Outcome::Committed => {
                self.set_status("Note saved");
                true
            }
            _ => false,
        }
    }

    pub fn cancel_input(&mut self) {
        self.mode = Mode::Normal;
        self.input_buffer.clear();
        self.editing_note = None;
    }

    /// Take the typed path and leave input mode
    pub fn finish_input(&mut self) -> String {
        self.mode = Mode::Normal;
        std::mem::take(&mut self.input_buffer)
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get title for display
    pub fn title(&self) -> String {
        let view = self.view();
        match view.page {
            Some(page) => format!(
                "{} note(s), {} image(s)",
                page.notes.len(),
                page.images.len()
            ),
            None => "No page".to_string(),
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.notes().len();
        if self.note_selected >= count {
            self.note_selected = count.saturating_sub(1);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
