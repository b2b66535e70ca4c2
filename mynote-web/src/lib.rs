//! MyNote Web - WebAssembly version of the page editor
//!
//! This crate provides a browser-based version of MyNote using Ratzilla
//! for terminal rendering in the DOM. Files are picked through a hidden
//! `<input type="file">` and saved as a `pages.json` download.
//!
//! No `log` backend is installed here, so records from `mynote-core` are not
//! shown in the browser. Failures the user should know about go to the status
//! bar and to `console.warn`.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{event::KeyCode, DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use mynote_core::{App, Mode, EXPORT_FILE_NAME};

use io::ReadAs;

pub mod io;
mod ui;

/// A key press that needs the browser's file picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    PickImage,
    PickPages,
}

/// Initialize the MyNote web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Wrap in Rc<RefCell> for shared state
    let app_state = Rc::new(RefCell::new(App::new()));

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let request = {
                let mut app = app_state_cloned.borrow_mut();
                app.clear_status();

                match app.mode {
                    Mode::Normal => handle_normal_mode(&mut app, event.code),
                    Mode::Input => {
                        handle_input_mode(&mut app, event.code);
                        None
                    }
                    Mode::Help => {
                        app.mode = Mode::Normal;
                        None
                    }
                }
            };

            // The picker calls back later, after this borrow is released
            if let Some(request) = request {
                if let Err(e) = open_picker(&app_state_cloned, request) {
                    web_sys::console::error_1(&e);
                }
            }
        }
    });

    // Draw loop
    terminal.draw_web(move |frame| {
        let app = app_state.borrow();
        ui::draw(frame, &app);
    });

    web_sys::console::log_1(&"MyNote WASM initialized".into());

    Ok(())
}

fn open_picker(app_state: &Rc<RefCell<App>>, request: Request) -> Result<(), JsValue> {
    let app_state = app_state.clone();
    match request {
        Request::PickImage => io::pick_file("image/*", ReadAs::DataUrl, move |data| {
            app_state.borrow_mut().add_image(data);
        }),
        Request::PickPages => {
            io::pick_file(".json,application/json", ReadAs::Text, move |content| {
                let mut app = app_state.borrow_mut();
                if !app.load_json(&content) {
                    if let Some(message) = &app.status_message {
                        web_sys::console::warn_1(&JsValue::from_str(message));
                    }
                }
            })
        }
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) -> Option<Request> {
    match code {
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Note navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_note(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_note(),

        // Editing
        KeyCode::Char('p') => app.add_page(),
        KeyCode::Char('n') => {
            if !app.add_note() {
                app.set_status("Add a page first (p)");
            }
        }
        KeyCode::Char('i') => {
            if app.view().can_add_image {
                return Some(Request::PickImage);
            }
            app.set_status("Add a page first (p)");
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if !app.begin_note_edit() {
                app.set_status("No note selected");
            }
        }

        // History
        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('r') | KeyCode::Char('U') => app.redo(),

        // File
        KeyCode::Char('s') => match app.export_json() {
            Ok(json) => {
                if let Err(e) = io::download_json(EXPORT_FILE_NAME, &json) {
                    app.set_status(&format!("Export failed: {:?}", e));
                } else {
                    app.set_status(&format!("Saved {}", EXPORT_FILE_NAME));
                }
            }
            Err(e) => app.set_status(&format!("Serialization failed: {}", e)),
        },
        KeyCode::Char('o') => return Some(Request::PickPages),

        _ => {}
    }
    None
}

fn handle_input_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => {
            app.commit_note_edit();
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}
