use mynote_core::{EditSession, Intent, Outcome};

fn page_with_note() -> EditSession {
    let mut session = EditSession::new();
    session.apply(Intent::AddPage);
    session.apply(Intent::AddNote);
    session
}

#[test]
fn edit_note_text_after_adding_page_and_note() {
    let mut session = page_with_note();
    let note_id = session.active_page().unwrap().notes[0].id;

    let outcome = session.apply(Intent::EditNoteText {
        note_id,
        text: "hello".to_string(),
    });

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(session.current().len(), 1);
    let page = session.active_page().unwrap();
    assert_eq!(page.notes.len(), 1);
    assert_eq!(page.notes[0].text, "hello");
}

#[test]
fn undo_removes_second_note() {
    let mut session = page_with_note();
    session.apply(Intent::AddNote);
    assert_eq!(session.active_page().unwrap().notes.len(), 2);

    session.apply(Intent::Undo);

    assert_eq!(session.active_page().unwrap().notes.len(), 1);
}

#[test]
fn new_edit_after_undo_discards_redo() {
    let mut session = page_with_note();
    session.apply(Intent::Undo);
    session.apply(Intent::AddImage("data:image/png;base64,iVBORw0K".to_string()));

    assert_eq!(session.apply(Intent::Redo), Outcome::Unchanged);

    let page = session.active_page().unwrap();
    assert_eq!(page.notes.len(), 0);
    assert_eq!(page.images.len(), 1);
}

#[test]
fn undo_keeps_previous_snapshot_intact() {
    let mut session = page_with_note();
    let before = session.current().clone();
    let note_id = before.pages().next().unwrap().notes[0].id;

    session.apply(Intent::EditNoteText {
        note_id,
        text: "changed".to_string(),
    });
    session.apply(Intent::Undo);

    assert_eq!(session.current(), &before);
    assert_eq!(session.active_page().unwrap().notes[0].text, "");
}

#[test]
fn export_then_import_restores_content() {
    let mut session = page_with_note();
    let note_id = session.active_page().unwrap().notes[0].id;
    session.apply(Intent::EditNoteText {
        note_id,
        text: "keep me".to_string(),
    });
    session.apply(Intent::AddImage("data:image/gif;base64,R0lGODlh".to_string()));
    let json = session.export().unwrap();

    let mut restored = EditSession::new();
    restored.import(&json).unwrap();

    assert_eq!(restored.current(), session.current());
    assert_eq!(restored.active_page_id(), session.active_page_id());
    assert!(restored.view().can_undo);
}

#[test]
fn malformed_import_keeps_session_usable() {
    let mut session = page_with_note();
    let before = session.current().clone();

    assert!(session.import("[{").is_err());
    assert_eq!(session.current(), &before);

    assert_eq!(session.apply(Intent::AddNote), Outcome::Committed);
    assert_eq!(session.active_page().unwrap().notes.len(), 2);
}

#[test]
fn imported_duplicate_note_ids_edit_one_note() {
    let mut session = EditSession::new();
    let content = r#"[{"notes": [
        {"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11", "text": "a"},
        {"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11", "text": "b"}
    ]}]"#;
    session.import(content).unwrap();
    let note_id = session.active_page().unwrap().notes[1].id;

    let outcome = session.apply(Intent::EditNoteText {
        note_id,
        text: "B".to_string(),
    });

    assert_eq!(outcome, Outcome::Committed);
    let texts: Vec<_> = session
        .active_page()
        .unwrap()
        .notes
        .iter()
        .map(|n| n.text.clone())
        .collect();
    assert_eq!(texts, ["a", "B"]);
}
