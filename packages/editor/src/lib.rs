//! # Bibworks Editor
//!
//! Change tracking and undo/redo engine for bibliographic documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI / background workers                     │
//! │  - gestures, pasted records, fetched data   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + history        │
//! │  - Every mutation becomes a Change          │
//! │  - ChangeBuffer: undo/redo + save tracking  │
//! │  - Edit queue + load signal for off-thread  │
//! │    work to re-enter the mutation path       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: item registry + record snapshots     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Everything undoable goes through `push`**: gestures build a
//!    [`Change`] and hand it over; nothing mutates items behind history's
//!    back.
//! 2. **Changes carry both sides**: applying and reverting are absolute
//!    writes, so replays cannot drift.
//! 3. **Views are observers**: document state never depends on what a
//!    [`ViewSync`] implementation does with its notifications.
//! 4. **One mutation thread**: background work hands records over via
//!    channels instead of touching documents directly.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bibworks_editor::{Document, EditorConfig, HeadlessView};
//!
//! let mut view = HeadlessView;
//! let mut doc = Document::new("refs.bib", EditorConfig::default());
//!
//! let id = doc.add_empty_item(&mut view)?;
//! doc.edit_field(&id, "title", Some("Literate Programming".into()), &mut view)?;
//!
//! doc.undo(&mut view)?;
//! doc.redo(&mut view)?;
//! ```

mod change;
mod change_buffer;
mod config;
mod document;
mod errors;
mod queue;
mod store;
mod view;

pub use change::{Change, Direction};
pub use change_buffer::ChangeBuffer;
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use document::Document;
pub use errors::EditorError;
pub use queue::{
    edit_channel, load_channel, EditInbox, EditSender, IncomingEdit, LoadNotifier, LoadOutcome,
    LoadSignal,
};
pub use store::DocumentStore;
pub use view::{HeadlessView, ViewSync};

// Re-export common types for convenience
pub use bibworks_model::{Bibliography, Entry, Item, ItemId};
