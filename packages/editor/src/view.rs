//! # View Synchronization
//!
//! The document core never talks to widgets directly. Every operation that
//! changes what the user should see reports through [`ViewSync`], and the
//! embedding UI decides what each notification means for its widgets.
//!
//! ## Contract
//!
//! - Notifications are best-effort hints. They carry no results and cannot
//!   fail; document state never depends on what a view does with them.
//! - Every method has a no-op default, so a headless document (tests, batch
//!   tools) runs against [`HeadlessView`] unchanged.

use bibworks_model::ItemId;

/// Receiver for view updates emitted by document operations.
pub trait ViewSync {
    /// One field of one item changed; refresh its editor widget and row cell.
    fn refresh_field(&mut self, _item: &ItemId, _field: &str) {}

    /// An item's whole record changed; re-render everything derived from it.
    fn refresh_record(&mut self, _item: &ItemId) {}

    /// Visibility flags changed; re-run the list filter.
    fn invalidate_filter(&mut self) {}

    /// Replace the current selection with these items.
    fn select(&mut self, _items: &[ItemId]) {}

    /// Scroll to and focus the currently selected item.
    fn focus_current(&mut self) {}

    /// Put the input cursor into one field's editor widget.
    fn focus_field(&mut self, _item: &ItemId, _field: &str) {}

    /// Nothing is left to select; show the empty state.
    fn set_empty_state(&mut self) {}

    /// The document's dirty flag changed (title bar asterisk and friends).
    fn set_dirty(&mut self, _dirty: bool) {}
}

/// A view that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl ViewSync for HeadlessView {}
