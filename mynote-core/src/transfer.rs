//! JSON import and export of a document's page list.
//!
//! The file is a plain array of pages:
//!
//! ```json
//! [{ "id": "…", "notes": [{ "id": "…", "text": "…" }], "images": [{ "id": "…", "src": "data:…" }] }]
//! ```

use log::{info, warn};

use crate::error::TransferError;
use crate::model::Snapshot;

/// Name offered when the document is saved
pub const EXPORT_FILE_NAME: &str = "pages.json";

/// Serialize every page of `snapshot`, pretty-printed
pub fn to_json(snapshot: &Snapshot) -> Result<String, TransferError> {
    serde_json::to_string_pretty(snapshot).map_err(TransferError::Serialize)
}

/// Parse a pages file.
///
/// Pages without `notes` or `images` (or with `null` there) get empty lists
/// and notes without `text` get an empty string, so partial documents still
/// load. Ids that repeat within the file are replaced, so every page, note and
/// image can still be addressed on its own.
pub fn from_json(content: &str) -> Result<Snapshot, TransferError> {
    match serde_json::from_str::<Snapshot>(content) {
        Ok(mut snapshot) => {
            let replaced = snapshot.dedup_ids();
            if replaced > 0 {
                warn!("transfer: replaced {} duplicate id(s)", replaced);
            }
            info!("transfer: parsed {} page(s)", snapshot.len());
            Ok(snapshot)
        }
        Err(e) => {
            warn!("transfer: rejected pages file: {}", e);
            Err(TransferError::Parse(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn sample() -> Snapshot {
        let page = Page::new();
        let page_id = page.id;
        let snapshot = Snapshot::new(vec![page])
            .add_note_to(page_id)
            .add_note_to(page_id)
            .add_image_to(page_id, "data:image/png;base64,AAAA");
        let notes: Vec<_> = snapshot.page(page_id).unwrap().notes.iter().map(|n| n.id).collect();
        snapshot
            .update_note_text(page_id, notes[0], "first")
            .update_note_text(page_id, notes[1], "second\nline")
    }

    #[test]
    fn test_export_then_import_preserves_content() {
        let snapshot = sample();
        let json = to_json(&snapshot).unwrap();
        let restored = from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_export_field_names() {
        let json = to_json(&sample()).unwrap();

        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"notes\""));
        assert!(json.contains("\"text\": \"first\""));
        assert!(json.contains("\"src\": \"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn test_import_fills_missing_lists() {
        let snapshot = from_json(r#"[{"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11"}, {}]"#).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.pages().all(|p| p.notes.is_empty() && p.images.is_empty()));
        assert_eq!(
            snapshot.first_page_id().unwrap().to_string(),
            "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11"
        );
    }

    #[test]
    fn test_import_replaces_numeric_ids() {
        let content = r#"[{
            "id": 1700000000000,
            "notes": [{"text": "a", "id": 1700000000001}, {"text": "b", "id": 1700000000001}],
            "images": [{"src": "data:image/gif;base64,R0lG", "id": 1700000000002}]
        }]"#;
        let snapshot = from_json(content).unwrap();

        let page = snapshot.pages().next().unwrap();
        assert_eq!(page.notes.len(), 2);
        assert_ne!(page.notes[0].id, page.notes[1].id);
        assert_eq!(page.notes[1].text, "b");
        assert_eq!(page.images[0].mime_type(), Some("image/gif"));
    }

    #[test]
    fn test_import_treats_null_as_missing() {
        let snapshot =
            from_json(r#"[{"id": 1, "notes": null, "images": null}, {"notes": [{"text": null}]}]"#)
                .unwrap();

        let pages: Vec<_> = snapshot.pages().collect();
        assert!(pages[0].notes.is_empty());
        assert!(pages[0].images.is_empty());
        assert_eq!(pages[1].notes[0].text, "");
    }

    #[test]
    fn test_import_replaces_duplicate_ids() {
        let content = r#"[{
            "id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11",
            "notes": [
                {"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11", "text": "a"},
                {"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11", "text": "b"}
            ],
            "images": [{"id": "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11", "src": "x"}]
        }]"#;
        let snapshot = from_json(content).unwrap();

        let page = snapshot.pages().next().unwrap();
        let page_id = page.id;
        let mut ids = vec![page_id, page.notes[0].id, page.notes[1].id, page.images[0].id];
        assert_eq!(page_id.to_string(), "0b6f7c1e-3c0a-4c59-9d0e-2f1d7f0c2a11");
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        let second = page.notes[1].id;
        let edited = snapshot.update_note_text(page_id, second, "B");
        let notes = &edited.page(page_id).unwrap().notes;
        let texts: Vec<_> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["a", "B"]);
    }

    #[test]
    fn test_import_accepts_data_field_for_images() {
        let snapshot = from_json(r#"[{"images": [{"data": "opaque"}], "notes": [{}]}]"#).unwrap();

        let page = snapshot.pages().next().unwrap();
        assert_eq!(page.images[0].data, "opaque");
        assert_eq!(page.notes[0].text, "");
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(from_json("{not json"), Err(TransferError::Parse(_))));
        assert!(matches!(from_json(r#"{"id": 1}"#), Err(TransferError::Parse(_))));
        assert!(matches!(from_json(r#"[{"images": [{}]}]"#), Err(TransferError::Parse(_))));
    }

    #[test]
    fn test_empty_document_round_trips() {
        let json = to_json(&Snapshot::default()).unwrap();
        assert_eq!(json, "[]");
        assert!(from_json(&json).unwrap().is_empty());
    }
}
