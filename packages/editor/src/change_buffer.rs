//! # Change Buffer
//!
//! Linear undo/redo history with save tracking and temporal coalescing.
//!
//! ## Design
//!
//! - One `Vec` holds the whole history; a cursor points at the last applied
//!   change. Index 0 is a `None` sentinel standing for "document as loaded",
//!   so the cursor is always a valid index and "fully undone" needs no
//!   special case.
//! - Pushing while undone truncates everything after the cursor. History is
//!   linear; the redone-over branch is gone for good.
//! - The save point is the cursor value at the last save. The document is
//!   dirty exactly when the cursor sits elsewhere. Truncation can destroy
//!   the saved state itself, after which no amount of undoing gets back to
//!   it; the save point becomes unreachable until the next save.
//! - Bursts of edits to the same target within the undo delay merge into
//!   one history entry, so typing a word is one undo step, not one per
//!   keystroke. Merging never crosses the save point and is always
//!   delegated to [`Change::coalesce`].

use std::time::{Duration, Instant};
use tracing::debug;

use bibworks_model::Bibliography;

use crate::change::Change;
use crate::errors::EditorError;
use crate::view::ViewSync;

/// Undo/redo history for one document.
#[derive(Debug)]
pub struct ChangeBuffer {
    /// History entries, oldest first. Index 0 is always the `None`
    /// sentinel; every later slot is `Some`.
    entries: Vec<Option<Change>>,

    /// Index of the last applied change (0 = nothing applied).
    cursor: usize,

    /// Cursor value at the last save; `None` once truncation destroyed
    /// the saved state.
    saved_cursor: Option<usize>,

    /// When the last push landed, for the coalescing window.
    last_commit: Instant,

    /// Window within which successive like changes merge.
    undo_delay: Duration,
}

impl ChangeBuffer {
    pub fn new(undo_delay: Duration) -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
            saved_cursor: Some(0),
            last_commit: Instant::now(),
            undo_delay,
        }
    }

    /// Record a change and apply it to the document.
    ///
    /// This is the single entry point for new changes: it drops any redo
    /// tail, merges the change into the previous entry when the coalescing
    /// rules allow, applies it, and reports the new dirty state.
    pub fn push(
        &mut self,
        change: Change,
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
    ) -> Result<(), EditorError> {
        change.validate(bib)?;
        self.truncate_redo();

        let kind = change.kind_name();
        let coalesced = self.last_commit.elapsed() < self.undo_delay
            && self.saved_cursor != Some(self.cursor)
            && self.entries[self.cursor]
                .as_mut()
                .map_or(false, |previous| previous.coalesce(&change));

        if !coalesced {
            self.entries.push(Some(change));
            self.cursor += 1;
        }
        debug!(
            "Recorded {} at cursor {} (coalesced: {})",
            kind, self.cursor, coalesced
        );

        if let Some(current) = self.entries[self.cursor].as_ref() {
            current.apply(bib, view, false)?;
        }
        self.last_commit = Instant::now();
        view.set_dirty(self.is_dirty());
        Ok(())
    }

    /// Step one change back. Returns `false` at the load sentinel.
    pub fn undo(
        &mut self,
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
    ) -> Result<bool, EditorError> {
        let change = match self.entries[self.cursor].as_ref() {
            Some(change) => change,
            None => return Ok(false),
        };
        change.validate(bib)?;
        change.revert(bib, view)?;
        self.cursor -= 1;
        view.set_dirty(self.is_dirty());
        if let Some((item, field)) = change.field_target() {
            view.focus_field(item, field);
        }
        debug!("Undid {}, cursor now {}", change.kind_name(), self.cursor);
        Ok(true)
    }

    /// Step one change forward again. Returns `false` at the tip.
    pub fn redo(
        &mut self,
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
    ) -> Result<bool, EditorError> {
        let next_index = self.cursor + 1;
        let change = match self.entries.get(next_index).and_then(Option::as_ref) {
            Some(change) => change,
            None => return Ok(false),
        };
        change.validate(bib)?;
        change.apply(bib, view, true)?;
        self.cursor = next_index;
        view.set_dirty(self.is_dirty());
        if let Some((item, field)) = change.field_target() {
            view.focus_field(item, field);
        }
        debug!("Redid {}, cursor now {}", change.kind_name(), self.cursor);
        Ok(true)
    }

    /// Pin the save point to the current cursor.
    pub fn mark_saved(&mut self) {
        self.saved_cursor = Some(self.cursor);
    }

    /// Whether the document differs from its last saved state.
    pub fn is_dirty(&self) -> bool {
        self.saved_cursor != Some(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Total number of slots, sentinel included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Save point, `None` while it is unreachable.
    pub fn saved_cursor(&self) -> Option<usize> {
        self.saved_cursor
    }

    /// The change at a history slot; `None` for the sentinel.
    pub fn entry(&self, index: usize) -> Option<&Change> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// Drop the redo tail, losing the save point when it lived there.
    fn truncate_redo(&mut self) {
        if self.saved_cursor.map_or(false, |saved| saved > self.cursor) {
            debug!("Saved state truncated away; document stays dirty until the next save");
            self.saved_cursor = None;
        }
        self.entries.truncate(self.cursor + 1);
    }
}
