//! Terminal UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use mynote_core::{App, InputTarget, Mode, Page, SLOGAN};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const OVERLAY0: Color = Color::Rgb(108, 112, 134);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const PEACH: Color = Color::Rgb(250, 179, 135);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Toolbar
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_toolbar(frame, app, chunks[1]);
    draw_page(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    // Draw popups/overlays
    match app.mode {
        Mode::Input if app.input_target != InputTarget::NoteText => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(" MyNote - {}", app.title());
    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

/// Key hints, greyed out when the action is unavailable
fn draw_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let buttons = [
        ("p", "Add Page", true),
        ("o", "Load JSON", true),
        ("n", "Add TextBox", view.can_add_note),
        ("i", "Add Image", view.can_add_image),
        ("s", "Save Pages", true),
        ("u", "Undo", view.can_undo),
        ("r", "Redo", view.can_redo),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (key, label, enabled) in buttons {
        let style = if enabled {
            Style::default().fg(BLUE)
        } else {
            Style::default().fg(OVERLAY0)
        };
        spans.push(Span::styled(format!("[{}] {}", key, label), style));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_page(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Page");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.page() {
        Some(page) => draw_page_content(frame, app, page, inner),
        None => {
            let hint = if app.show_slogan {
                SLOGAN
            } else {
                "No page. Press p to add one."
            };
            let paragraph = Paragraph::new(hint).style(Style::default().fg(SUBTEXT0));
            frame.render_widget(paragraph, inner);
        }
    }
}

fn draw_page_content(frame: &mut Frame, app: &App, page: &Page, area: Rect) {
    let image_rows = if page.images.is_empty() {
        0
    } else {
        page.images.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(image_rows)])
        .split(area);

    let editing = app.mode == Mode::Input && app.input_target == InputTarget::NoteText;
    let mut lines: Vec<Line> = Vec::new();

    for (i, note) in page.notes.iter().enumerate() {
        let selected = i == app.note_selected;
        let marker = if selected { ">" } else { " " };
        let text = if selected && editing {
            format!("{}_", app.input_buffer)
        } else if note.text.is_empty() {
            "(empty)".to_string()
        } else {
            note.text.clone()
        };

        let style = match (selected, editing) {
            (true, true) => Style::default().fg(GREEN).bg(SURFACE1),
            (true, false) => Style::default().fg(TEXT).bg(SURFACE1),
            _ if note.text.is_empty() => Style::default().fg(OVERLAY0),
            _ => Style::default().fg(TEXT),
        };

        for (n, line) in text.lines().enumerate() {
            let prefix = if n == 0 { marker } else { " " };
            lines.push(Line::from(Span::styled(format!("{} {}", prefix, line), style)));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No notes yet. Press n to add one.",
            Style::default().fg(SUBTEXT0),
        )));
    }

    // Keep the selected note in view
    let visible_height = chunks[0].height as usize;
    let selected_row: usize = page
        .notes
        .iter()
        .take(app.note_selected)
        .map(|n| n.text.lines().count().max(1) + 1)
        .sum();
    let scroll_offset = if selected_row >= visible_height {
        selected_row - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .scroll((scroll_offset as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[0]);

    if !page.images.is_empty() {
        let items: Vec<ListItem> = page
            .images
            .iter()
            .map(|image| {
                ListItem::new(format!("[image] {}", image.summary()))
                    .style(Style::default().fg(PEACH))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(SUBTEXT0))
                .title(format!("Images ({})", page.images.len())),
        );
        frame.render_widget(list, chunks[1]);
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Input => "INPUT",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let help_hint = match app.mode {
        Mode::Input => "Enter save | Alt+Enter newline | Esc cancel",
        _ => "j/k select | e edit | u/r undo/redo | q quit | ? help",
    };

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 3, frame.area());
    frame.render_widget(Clear, area);

    let title = match app.input_target {
        InputTarget::ImagePath => "Image file path",
        InputTarget::LoadPath => "Pages file to load",
        InputTarget::NoteText => "Note",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer)).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(56, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Page", heading)),
        Line::from("  p        New page (replaces the current one)"),
        Line::from("  n        Add a note"),
        Line::from("  i        Add an image from a file"),
        Line::from(""),
        Line::from(Span::styled("Notes", heading)),
        Line::from("  j/k      Select next/previous note"),
        Line::from("  e/Enter  Edit selected note"),
        Line::from(""),
        Line::from(Span::styled("History", heading)),
        Line::from("  u        Undo"),
        Line::from("  r/U      Redo"),
        Line::from(""),
        Line::from(Span::styled("File", heading)),
        Line::from("  s        Save pages.json"),
        Line::from("  o        Load a pages file"),
        Line::from("  q        Quit"),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
