//! Linear undo/redo log of document snapshots.
//!
//! The log only ever grows at the cursor: committing after an undo drops the
//! undone branch for good. There is no tree of alternatives.

use log::debug;

use crate::model::Snapshot;

static EMPTY: Snapshot = Snapshot::EMPTY;

/// Ordered snapshots plus the index of the active one
#[derive(Debug, Clone, Default)]
pub struct History {
    log: Vec<Snapshot>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active snapshot, or an empty document before the first commit
    pub fn current(&self) -> &Snapshot {
        self.cursor
            .and_then(|cursor| self.log.get(cursor))
            .unwrap_or(&EMPTY)
    }

    /// Record `snapshot` as the new active state.
    ///
    /// Everything after the cursor is discarded first. On the very first
    /// commit the empty starting document becomes entry 0 so that the first
    /// edit can be undone like any other.
    pub fn commit(&mut self, snapshot: Snapshot) {
        match self.cursor {
            Some(cursor) => {
                let dropped = self.log.len() - (cursor + 1);
                if dropped > 0 {
                    debug!("history: discarding {} undone snapshot(s)", dropped);
                }
                self.log.truncate(cursor + 1);
            }
            None => {
                self.log.clear();
                self.log.push(Snapshot::default());
            }
        }

        self.log.push(snapshot);
        let cursor = self.log.len() - 1;
        self.cursor = Some(cursor);
        debug!("history: committed entry {}", cursor);
    }

    pub fn undo(&mut self) -> &Snapshot {
        if let Some(cursor) = self.cursor.filter(|&c| c > 0) {
            self.cursor = Some(cursor - 1);
            debug!("history: undo to entry {}", cursor - 1);
        }
        self.current()
    }

    pub fn redo(&mut self) -> &Snapshot {
        if self.can_redo() {
            let cursor = self.cursor.map_or(0, |c| c + 1);
            self.cursor = Some(cursor);
            debug!("history: redo to entry {}", cursor);
        }
        self.current()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.log.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![Page::new()])
    }

    #[test]
    fn test_starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_first_commit_keeps_empty_baseline() {
        let mut history = History::new();
        let s1 = snapshot();
        history.commit(s1.clone());

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.current(), &s1);
        assert!(history.can_undo());

        assert!(history.undo().is_empty());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut history = History::new();
        let s1 = snapshot();
        let s2 = snapshot();
        history.commit(s1.clone());
        history.commit(s2.clone());

        assert_eq!(history.undo(), &s1);
        assert!(history.can_redo());
        assert_eq!(history.redo(), &s2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_after_undo_truncates() {
        let mut history = History::new();
        let s1 = snapshot();
        let s2 = snapshot();
        let s3 = snapshot();
        history.commit(s1);
        history.commit(s2);
        history.undo();
        history.commit(s3.clone());

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), &s3);
        assert_eq!(history.current(), &s3);
    }

    #[test]
    fn test_boundaries_are_idempotent() {
        let mut history = History::new();
        assert!(history.undo().is_empty());
        assert!(history.redo().is_empty());

        let s1 = snapshot();
        history.commit(s1.clone());
        for _ in 0..3 {
            history.redo();
        }
        assert_eq!(history.current(), &s1);

        for _ in 0..3 {
            history.undo();
        }
        assert_eq!(history.cursor(), Some(0));
        assert!(history.current().is_empty());
    }
}
