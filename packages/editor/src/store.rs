//! # Document Store
//!
//! The set of open documents, keyed by name in opening order (tab order).
//! The store hands out one name per fresh document, routes save-as renames,
//! and returns closed documents to the caller so close-time policy (prompt
//! on unsaved changes, keep-or-drop) stays with the UI.

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;

use crate::config::EditorConfig;
use crate::document::Document;
use crate::errors::EditorError;
use crate::queue::LoadOutcome;

pub struct DocumentStore {
    documents: IndexMap<String, Document>,
    config: EditorConfig,
    untitled: u32,
}

impl DocumentStore {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            documents: IndexMap::new(),
            config,
            untitled: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Create a fresh in-memory document under the next free untitled name.
    pub fn new_document(&mut self) -> &mut Document {
        let name = loop {
            self.untitled += 1;
            let candidate = format!("untitled-{}.bib", self.untitled);
            if !self.documents.contains_key(&candidate) {
                break candidate;
            }
        };
        let doc = Document::new(&name, self.config.clone());
        self.documents.entry(name).or_insert(doc)
    }

    /// Register a document from a finished load. Reopening a name replaces
    /// the previous session for that name.
    pub fn open(&mut self, outcome: LoadOutcome) -> &mut Document {
        let LoadOutcome { name, entries } = outcome;
        let doc = Document::from_entries(&name, entries, self.config.clone());
        match self.documents.entry(name) {
            MapEntry::Occupied(mut occupied) => {
                occupied.insert(doc);
                occupied.into_mut()
            }
            MapEntry::Vacant(vacant) => vacant.insert(doc),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.documents.get_mut(name)
    }

    /// Move a document to a new name (save-as). An open document already
    /// using the new name is dropped, matching save-as overwrite semantics.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), EditorError> {
        if old == new {
            return Ok(());
        }
        let mut doc = self
            .documents
            .shift_remove(old)
            .ok_or_else(|| EditorError::UnknownDocument(old.to_string()))?;
        doc.set_name(new);
        self.documents.shift_remove(new);
        self.documents.insert(new.to_string(), doc);
        Ok(())
    }

    /// Remove a document, handing it back for close-time inspection.
    pub fn close(&mut self, name: &str) -> Result<Document, EditorError> {
        self.documents
            .shift_remove(name)
            .ok_or_else(|| EditorError::UnknownDocument(name.to_string()))
    }

    /// Open documents in tab order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
