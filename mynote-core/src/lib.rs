//! MyNote Core - Platform-agnostic page editing library
//!
//! This crate provides the document model, the undo/redo history and the
//! edit session shared by the terminal and browser frontends. It has no
//! I/O of its own: frontends read files and hand the contents over.

pub mod app;
pub mod error;
pub mod history;
pub mod model;
pub mod session;
pub mod transfer;

pub use app::{App, InputTarget, Mode, SLOGAN};
pub use error::TransferError;
pub use history::History;
pub use model::{Image, Note, Page, Snapshot};
pub use session::{EditSession, Intent, Outcome, View};
pub use transfer::{from_json, to_json, EXPORT_FILE_NAME};
