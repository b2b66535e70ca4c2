use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Image, Note, Page};

/// The whole document at one point in time.
///
/// Snapshots are never mutated. Every edit returns a new snapshot that shares
/// the untouched pages (and image payloads) with its predecessor, so keeping a
/// long history around costs little more than the edited pages themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pages: Vec<Arc<Page>>,
}

impl Snapshot {
    pub const EMPTY: Snapshot = Snapshot { pages: Vec::new() };

    /// A snapshot made of exactly `pages`; nothing from any earlier state is kept
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: pages.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().map(Arc::as_ref)
    }

    pub fn page(&self, id: Uuid) -> Option<&Page> {
        self.pages().find(|p| p.id == id)
    }

    pub fn first_page_id(&self) -> Option<Uuid> {
        self.pages.first().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Append an empty note to the page with `page_id`
    pub fn add_note_to(&self, page_id: Uuid) -> Snapshot {
        self.map_page(page_id, |page| {
            let mut page = page.clone();
            page.notes.push(Note::new());
            Some(page)
        })
    }

    /// Append an image carrying `data` to the page with `page_id`
    pub fn add_image_to(&self, page_id: Uuid, data: impl Into<String>) -> Snapshot {
        let image = Arc::new(Image::new(data));
        self.map_page(page_id, move |page| {
            let mut page = page.clone();
            page.images.push(image);
            Some(page)
        })
    }

    /// Replace the text of one note. Unknown page or note ids leave the
    /// snapshot as it is.
    pub fn update_note_text(&self, page_id: Uuid, note_id: Uuid, text: &str) -> Snapshot {
        self.map_page(page_id, |page| {
            let index = page.notes.iter().position(|n| n.id == note_id)?;
            let mut page = page.clone();
            page.notes[index] = page.notes[index].with_text(text);
            Some(page)
        })
    }

    /// Give a fresh id to every page, note or image whose id was already
    /// taken earlier in the document. Returns how many ids were replaced.
    pub(crate) fn dedup_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut replaced = 0;
        for page in &mut self.pages {
            let page = Arc::make_mut(page);
            replaced += claim(&mut seen, &mut page.id);
            for note in &mut page.notes {
                replaced += claim(&mut seen, &mut note.id);
            }
            for image in &mut page.images {
                replaced += claim(&mut seen, &mut Arc::make_mut(image).id);
            }
        }
        replaced
    }

    /// Rebuild the snapshot with one page swapped for the result of `edit`.
    /// `edit` returning `None` means nothing changed.
    fn map_page<F>(&self, page_id: Uuid, edit: F) -> Snapshot
    where
        F: FnOnce(&Page) -> Option<Page>,
    {
        let Some(index) = self.pages.iter().position(|p| p.id == page_id) else {
            return self.clone();
        };
        let Some(page) = edit(&self.pages[index]) else {
            return self.clone();
        };

        let mut pages = self.pages.clone();
        pages[index] = Arc::new(page);
        Snapshot { pages }
    }
}

fn claim(seen: &mut HashSet<Uuid>, id: &mut Uuid) -> usize {
    let mut replaced = 0;
    while !seen.insert(*id) {
        *id = Uuid::new_v4();
        replaced = 1;
    }
    replaced
}

impl From<Vec<Page>> for Snapshot {
    fn from(pages: Vec<Page>) -> Self {
        Self::new(pages)
    }
}
