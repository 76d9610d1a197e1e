//! # Edit Queue and Load Signal
//!
//! Two channel-shaped seams between background work and the single-threaded
//! mutation path.
//!
//! The edit queue carries record rewrites produced off-thread (reference
//! fetchers, format converters) into the owning thread, which drains them
//! through the normal replace path so every external edit is validated,
//! recorded in history, and undoable like any local gesture.
//!
//! The load signal is a one-shot completion handoff: a background loader
//! resolves it with the parsed records, and whoever is waiting blocks on
//! `recv` instead of polling a status flag. A loader that dies drops its
//! notifier, which wakes the waiter with [`EditorError::LoadInterrupted`].

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, sync_channel, Receiver, Sender, SyncSender, TryRecvError};
use tracing::debug;

use bibworks_model::{Entry, ItemId};

use crate::document::Document;
use crate::errors::EditorError;
use crate::view::ViewSync;

/// A record rewrite produced outside the owning thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingEdit {
    pub item: ItemId,
    pub entry: Entry,
}

/// Create the edit queue. The sender side is cheap to clone and hand to
/// background workers; the inbox stays with the document's thread.
pub fn edit_channel() -> (EditSender, EditInbox) {
    let (tx, rx) = channel();
    (EditSender { tx }, EditInbox { rx })
}

#[derive(Clone)]
pub struct EditSender {
    tx: Sender<IncomingEdit>,
}

impl EditSender {
    /// Queue one edit. Returns `false` when the inbox is gone.
    pub fn send(&self, edit: IncomingEdit) -> bool {
        self.tx.send(edit).is_ok()
    }
}

pub struct EditInbox {
    rx: Receiver<IncomingEdit>,
}

impl EditInbox {
    /// Apply every queued edit to the document through the replace path.
    ///
    /// Returns how many edits changed the document; rewrites equal to the
    /// current record are skipped. An edit naming an unknown item aborts
    /// the drain with [`EditorError::StaleReference`], leaving later edits
    /// queued.
    pub fn drain(
        &self,
        document: &mut Document,
        view: &mut dyn ViewSync,
    ) -> Result<usize, EditorError> {
        let mut applied = 0;
        while let Ok(edit) = self.rx.try_recv() {
            if document.replace_entry(&edit.item, edit.entry, view)? {
                applied += 1;
            }
        }
        if applied > 0 {
            debug!("Drained {} external edits into '{}'", applied, document.name());
        }
        Ok(applied)
    }

    /// Take one queued edit without applying it.
    pub fn try_next(&self) -> Option<IncomingEdit> {
        self.rx.try_recv().ok()
    }
}

/// What a finished load hands over: the document name and its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// Create a load signal pair. The notifier goes to the loader; the signal
/// stays with whoever needs the result.
pub fn load_channel() -> (LoadNotifier, LoadSignal) {
    let (tx, rx) = sync_channel(1);
    (LoadNotifier { tx }, LoadSignal { rx })
}

pub struct LoadNotifier {
    tx: SyncSender<LoadOutcome>,
}

impl LoadNotifier {
    /// Deliver the load result, consuming the notifier. Returns `false`
    /// when nobody is waiting anymore.
    pub fn resolve(self, outcome: LoadOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

pub struct LoadSignal {
    rx: Receiver<LoadOutcome>,
}

impl LoadSignal {
    /// Block until the loader resolves or dies.
    pub fn wait(self) -> Result<LoadOutcome, EditorError> {
        self.rx.recv().map_err(|_| EditorError::LoadInterrupted)
    }

    /// Poll without blocking. `Ok(None)` means the load is still running.
    pub fn try_wait(&self) -> Result<Option<LoadOutcome>, EditorError> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EditorError::LoadInterrupted),
        }
    }
}
