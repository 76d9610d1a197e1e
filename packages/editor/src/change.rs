//! # Changes
//!
//! The closed set of undoable operations. Everything the user can do to a
//! document is expressed as one of these variants, so history handling
//! never needs to know what a gesture meant, only how to apply and revert
//! its record.
//!
//! ## Design
//!
//! - **Self-contained**: a change carries both sides of its state (old and
//!   new), so applying and reverting are absolute writes, not diffs. Doing
//!   either twice in a row is harmless.
//! - **Validated**: every target id is checked before any state is touched;
//!   a missing item fails with [`EditorError::StaleReference`] instead of
//!   corrupting the document.
//! - **Explicit merging**: [`Change::coalesce`] is the only way two changes
//!   combine, and only the history layer calls it.
//!
//! ## Variant Semantics
//!
//! ### FieldEdit
//! - One field of one item; `None` values mean the field is absent
//! - Revert restores the old value without moving the selection
//!
//! ### Visibility
//! - Show and Hide are one routine run in opposite directions
//! - Hiding relocates the selection to the next visible item, or reports
//!   the empty state when none is left
//!
//! ### EntryReplace
//! - Whole-record swap, always a full re-render of the item

use bibworks_model::{Bibliography, Entry, ItemId};
use serde::{Deserialize, Serialize};
use std::slice;

use crate::errors::EditorError;
use crate::view::ViewSync;

/// Which way a visibility change moves its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Show,
    Hide,
}

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Direction::Show => Direction::Hide,
            Direction::Hide => Direction::Show,
        }
    }
}

/// One undoable operation with enough state to go both ways.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Change {
    /// Replace the value of a single field (absolute, not a diff)
    FieldEdit {
        item: ItemId,
        field: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },

    /// Show or hide a set of items in one step
    Visibility {
        items: Vec<ItemId>,
        direction: Direction,
    },

    /// Swap an item's whole record for another snapshot
    EntryReplace {
        item: ItemId,
        old_entry: Entry,
        new_entry: Entry,
    },
}

impl Change {
    /// Check every id this change targets before touching anything.
    pub fn validate(&self, bib: &Bibliography) -> Result<(), EditorError> {
        let mut check = |id: &ItemId| {
            if bib.contains(id) {
                Ok(())
            } else {
                Err(EditorError::StaleReference(id.clone()))
            }
        };
        match self {
            Change::FieldEdit { item, .. } => check(item),
            Change::Visibility { items, .. } => items.iter().try_for_each(check),
            Change::EntryReplace { item, .. } => check(item),
        }
    }

    /// Apply the forward side of this change.
    ///
    /// `redo` distinguishes a replay from history (which also re-selects and
    /// focuses the touched item) from the first application, where the user
    /// is already looking at what they changed.
    pub fn apply(
        &self,
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
        redo: bool,
    ) -> Result<(), EditorError> {
        match self {
            Change::FieldEdit {
                item,
                field,
                new_value,
                ..
            } => Self::write_field(bib, view, item, field, new_value, redo),

            Change::Visibility { items, direction } => {
                Self::shift_visibility(bib, view, items, *direction)
            }

            Change::EntryReplace {
                item, new_entry, ..
            } => Self::write_entry(bib, view, item, new_entry, redo),
        }
    }

    /// Apply the inverse side of this change.
    pub fn revert(
        &self,
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
    ) -> Result<(), EditorError> {
        match self {
            Change::FieldEdit {
                item,
                field,
                old_value,
                ..
            } => Self::write_field(bib, view, item, field, old_value, false),

            Change::Visibility { items, direction } => {
                Self::shift_visibility(bib, view, items, direction.inverse())
            }

            Change::EntryReplace {
                item, old_entry, ..
            } => Self::write_entry(bib, view, item, old_entry, true),
        }
    }

    /// Try to fold `incoming` into this change so the pair undoes as one
    /// step. Only like-with-like merges: a field edit absorbs another edit
    /// of the same field of the same item, a record replacement absorbs
    /// another replacement of the same item. Visibility changes never merge.
    ///
    /// On success this change keeps its old side and adopts the incoming
    /// new side; the caller drops `incoming`.
    pub fn coalesce(&mut self, incoming: &Change) -> bool {
        match (self, incoming) {
            (
                Change::FieldEdit {
                    item,
                    field,
                    new_value,
                    ..
                },
                Change::FieldEdit {
                    item: new_item,
                    field: new_field,
                    new_value: incoming_value,
                    ..
                },
            ) if *item == *new_item && *field == *new_field => {
                *new_value = incoming_value.clone();
                true
            }

            (
                Change::EntryReplace {
                    item, new_entry, ..
                },
                Change::EntryReplace {
                    item: new_item,
                    new_entry: incoming_entry,
                    ..
                },
            ) if *item == *new_item => {
                *new_entry = incoming_entry.clone();
                true
            }

            _ => false,
        }
    }

    /// The field a post-undo/redo refocus should land in, if any.
    pub fn field_target(&self) -> Option<(&ItemId, &str)> {
        match self {
            Change::FieldEdit { item, field, .. } => Some((item, field.as_str())),
            _ => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Change::FieldEdit { .. } => "field-edit",
            Change::Visibility {
                direction: Direction::Show,
                ..
            } => "show",
            Change::Visibility {
                direction: Direction::Hide,
                ..
            } => "hide",
            Change::EntryReplace { .. } => "entry-replace",
        }
    }

    fn write_field(
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
        item: &ItemId,
        field: &str,
        value: &Option<String>,
        refocus: bool,
    ) -> Result<(), EditorError> {
        bib.set_field(item, field, value.clone())?;
        view.refresh_field(item, field);
        if refocus {
            view.select(slice::from_ref(item));
            view.focus_current();
        }
        Ok(())
    }

    fn write_entry(
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
        item: &ItemId,
        entry: &Entry,
        refocus: bool,
    ) -> Result<(), EditorError> {
        bib.replace_entry(item, entry.clone())?;
        view.refresh_record(item);
        if refocus {
            view.select(slice::from_ref(item));
            view.focus_current();
        }
        Ok(())
    }

    fn shift_visibility(
        bib: &mut Bibliography,
        view: &mut dyn ViewSync,
        items: &[ItemId],
        direction: Direction,
    ) -> Result<(), EditorError> {
        if items.is_empty() {
            return Ok(());
        }
        let hidden = matches!(direction, Direction::Hide);
        for item in items {
            bib.set_hidden(item, hidden)?;
        }
        view.invalidate_filter();
        match direction {
            Direction::Show => {
                view.select(items);
                view.focus_current();
            }
            Direction::Hide => {
                // The rows just vanished from under the selection; land it
                // on the next survivor in list order.
                let next = items.first().and_then(|first| bib.next_visible_after(first));
                match next {
                    Some(id) => {
                        view.select(slice::from_ref(&id));
                        view.focus_current();
                    }
                    None => view.set_empty_state(),
                }
            }
        }
        Ok(())
    }
}
