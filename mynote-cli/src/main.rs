//! MyNote CLI - Terminal-based single page note editor

mod config;
mod io;
mod logging;
mod ui;

use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, warn};
use ratatui::prelude::*;

use mynote_core::{App, InputTarget, Mode};

use config::{Args, Config};

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    let _logger = logging::init(&config.log_level, &config.log_dir())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new();

    // Load file if provided
    if let Some(path) = &config.open {
        load_pages(&mut app, path);
    }

    // Main loop
    let res = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        error!("terminal loop failed: {:#}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, config: &Config) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Clear status on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, key.code, key.modifiers, config),
                Mode::Input => handle_input_mode(app, key.code, key.modifiers),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode, _modifiers: KeyModifiers, config: &Config) {
    match code {
        KeyCode::Char('q') => app.running = false,
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
                app.begin_input(InputTarget::ImagePath);
            } else {
                app.set_status("Add a page first (p)");
            }
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
            Ok(json) => match io::export_pages(&json, &config.data_dir) {
                Ok(path) => app.set_status(&format!("Saved to {}", path.display())),
                Err(e) => {
                    warn!("save failed: {:#}", e);
                    app.set_status(&format!("Save failed: {}", e));
                }
            },
            Err(e) => app.set_status(&format!("Save failed: {}", e)),
        },
        KeyCode::Char('o') => app.begin_input(InputTarget::LoadPath),

        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        // Alt+Enter inserts a line break in note text
        KeyCode::Enter
            if modifiers.contains(KeyModifiers::ALT) && app.input_target == InputTarget::NoteText =>
        {
            app.input_buffer.push('\n');
        }
        KeyCode::Enter => match app.input_target {
            InputTarget::NoteText => {
                app.commit_note_edit();
            }
            InputTarget::ImagePath => {
                let path = PathBuf::from(app.finish_input());
                match io::read_image(&path) {
                    Ok(data) => {
                        app.add_image(data);
                    }
                    Err(e) => {
                        warn!("image load failed: {:#}", e);
                        app.set_status(&format!("Error: {}", e));
                    }
                }
            }
            InputTarget::LoadPath => {
                let path = PathBuf::from(app.finish_input());
                load_pages(app, &path);
            }
        },
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn load_pages(app: &mut App, path: &Path) {
    match io::read_pages(path) {
        Ok(content) => {
            if app.load_json(&content) {
                app.set_status(&format!("Loaded {}", path.display()));
            }
        }
        Err(e) => {
            warn!("load failed: {:#}", e);
            app.set_status(&format!("Error: {}", e));
        }
    }
}
