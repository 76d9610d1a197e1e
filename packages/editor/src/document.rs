//! # Document
//!
//! One open bibliography: the item registry, its change history, and the
//! gesture-level operations the UI calls. Every mutation funnels through
//! [`Document::push`] so nothing can bypass history recording, and each
//! operation compares against current state first so that no-op gestures
//! (saving an unchanged form, regenerating an identical key) leave no
//! history entry behind.

use bibworks_model::{Bibliography, Entry, ItemId, CITE_KEY};

use crate::change::{Change, Direction};
use crate::change_buffer::ChangeBuffer;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::view::ViewSync;

pub struct Document {
    name: String,
    bibliography: Bibliography,
    history: ChangeBuffer,
    config: EditorConfig,
    /// Whether this document was created in this session and never saved.
    created: bool,
}

impl Document {
    /// A fresh, empty document that exists only in memory.
    pub fn new(name: &str, config: EditorConfig) -> Self {
        Self {
            name: name.to_string(),
            bibliography: Bibliography::new(name),
            history: ChangeBuffer::new(config.undo_delay()),
            config,
            created: true,
        }
    }

    /// A document opened from already-loaded records.
    pub fn from_entries(name: &str, entries: Vec<Entry>, config: EditorConfig) -> Self {
        let mut bibliography = Bibliography::new(name);
        for entry in entries {
            bibliography.append(entry);
        }
        Self {
            name: name.to_string(),
            bibliography,
            history: ChangeBuffer::new(config.undo_delay()),
            config,
            created: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn bibliography(&self) -> &Bibliography {
        &self.bibliography
    }

    pub fn history(&self) -> &ChangeBuffer {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn created(&self) -> bool {
        self.created
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    /// Record and apply a prepared change.
    pub fn push(&mut self, change: Change, view: &mut dyn ViewSync) -> Result<(), EditorError> {
        self.history.push(change, &mut self.bibliography, view)
    }

    pub fn undo(&mut self, view: &mut dyn ViewSync) -> Result<bool, EditorError> {
        self.history.undo(&mut self.bibliography, view)
    }

    pub fn redo(&mut self, view: &mut dyn ViewSync) -> Result<bool, EditorError> {
        self.history.redo(&mut self.bibliography, view)
    }

    /// Pin the save point after a successful save.
    pub fn mark_saved(&mut self, view: &mut dyn ViewSync) {
        self.history.mark_saved();
        self.created = false;
        view.set_dirty(false);
    }

    /// Set one field to a new value, recording the edit. Returns `false`
    /// without touching history when the value is already current.
    pub fn edit_field(
        &mut self,
        item: &ItemId,
        field: &str,
        new_value: Option<String>,
        view: &mut dyn ViewSync,
    ) -> Result<bool, EditorError> {
        let old_value = self.bibliography.field(item, field)?.map(str::to_string);
        if old_value == new_value {
            return Ok(false);
        }
        self.push(
            Change::FieldEdit {
                item: item.clone(),
                field: field.to_string(),
                old_value,
                new_value,
            },
            view,
        )?;
        Ok(true)
    }

    /// Swap an item's record for a new snapshot, recording the replacement.
    /// Returns `false` when the snapshot equals the current record.
    pub fn replace_entry(
        &mut self,
        item: &ItemId,
        new_entry: Entry,
        view: &mut dyn ViewSync,
    ) -> Result<bool, EditorError> {
        let old_entry = match self.bibliography.get(item) {
            Some(existing) => existing.entry().clone(),
            None => return Err(EditorError::StaleReference(item.clone())),
        };
        if old_entry == new_entry {
            return Ok(false);
        }
        self.push(
            Change::EntryReplace {
                item: item.clone(),
                old_entry,
                new_entry,
            },
            view,
        )?;
        Ok(true)
    }

    /// Append a new record and record its appearance; undo hides it again.
    pub fn add_item(&mut self, entry: Entry, view: &mut dyn ViewSync) -> Result<ItemId, EditorError> {
        let id = self.bibliography.append(entry);
        self.push(
            Change::Visibility {
                items: vec![id.clone()],
                direction: Direction::Show,
            },
            view,
        )?;
        Ok(id)
    }

    /// Append an empty record of the configured default kind.
    pub fn add_empty_item(&mut self, view: &mut dyn ViewSync) -> Result<ItemId, EditorError> {
        let entry = Entry::new(&self.config.default_kind);
        self.add_item(entry, view)
    }

    /// Hide items (delete as the user sees it). Their ids stay valid.
    pub fn delete_items(&mut self, items: &[ItemId], view: &mut dyn ViewSync) -> Result<(), EditorError> {
        if items.is_empty() {
            return Ok(());
        }
        self.push(
            Change::Visibility {
                items: items.to_vec(),
                direction: Direction::Hide,
            },
            view,
        )
    }

    /// Bring hidden items back as a recorded change.
    pub fn restore_items(&mut self, items: &[ItemId], view: &mut dyn ViewSync) -> Result<(), EditorError> {
        if items.is_empty() {
            return Ok(());
        }
        self.push(
            Change::Visibility {
                items: items.to_vec(),
                direction: Direction::Show,
            },
            view,
        )
    }

    /// Derive and assign a citation key for one record. Returns `false`
    /// when no key can be derived or the record already carries it.
    pub fn generate_key(&mut self, item: &ItemId, view: &mut dyn ViewSync) -> Result<bool, EditorError> {
        match self.bibliography.suggest_key(item)? {
            Some(key) => self.edit_field(item, CITE_KEY, Some(key), view),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessView;

    fn quick_config() -> EditorConfig {
        EditorConfig {
            undo_delay_ms: 0,
            ..EditorConfig::default()
        }
    }

    #[test]
    fn test_new_document_is_created_and_clean() {
        let doc = Document::new("untitled-1.bib", quick_config());
        assert!(doc.created());
        assert!(!doc.is_dirty());
        assert!(doc.bibliography().is_empty());
    }

    #[test]
    fn test_from_entries_is_not_created() {
        let entries = vec![Entry::new("article"), Entry::new("book")];
        let doc = Document::from_entries("library.bib", entries, quick_config());
        assert!(!doc.created());
        assert_eq!(doc.bibliography().len(), 2);
        assert_eq!(doc.bibliography().visible().count(), 2);
    }

    #[test]
    fn test_edit_field_skips_noops() {
        let mut view = HeadlessView;
        let mut doc = Document::new("edits.bib", quick_config());
        let id = doc.add_empty_item(&mut view).unwrap();

        assert!(doc
            .edit_field(&id, "title", Some("T".to_string()), &mut view)
            .unwrap());
        let len = doc.history().len();

        // Same value again records nothing
        assert!(!doc
            .edit_field(&id, "title", Some("T".to_string()), &mut view)
            .unwrap());
        assert_eq!(doc.history().len(), len);

        // Absent-to-absent records nothing either
        assert!(!doc.edit_field(&id, "volume", None, &mut view).unwrap());
        assert_eq!(doc.history().len(), len);
    }

    #[test]
    fn test_add_item_undo_hides_but_keeps_id() {
        let mut view = HeadlessView;
        let mut doc = Document::new("adds.bib", quick_config());
        let id = doc.add_empty_item(&mut view).unwrap();
        assert_eq!(doc.bibliography().visible().count(), 1);

        assert!(doc.undo(&mut view).unwrap());
        assert_eq!(doc.bibliography().visible().count(), 0);
        assert!(doc.bibliography().contains(&id));

        assert!(doc.redo(&mut view).unwrap());
        assert_eq!(doc.bibliography().visible().count(), 1);
    }

    #[test]
    fn test_replace_entry_requires_known_item() {
        let mut view = HeadlessView;
        let mut doc = Document::new("replace.bib", quick_config());
        let mut other = Document::new("other.bib", quick_config());
        let stranger = other.add_empty_item(&mut view).unwrap();

        let result = doc.replace_entry(&stranger, Entry::new("book"), &mut view);
        assert!(matches!(result, Err(EditorError::StaleReference(_))));
    }

    #[test]
    fn test_generate_key_is_stable() {
        let mut view = HeadlessView;
        let mut doc = Document::new("keys.bib", quick_config());
        let id = doc
            .add_item(
                Entry::new("article")
                    .with_field("author", "Knuth, Donald E.")
                    .with_field("year", "1984"),
                &mut view,
            )
            .unwrap();

        assert!(doc.generate_key(&id, &mut view).unwrap());
        assert_eq!(doc.bibliography().field(&id, CITE_KEY), Ok(Some("knuth1984")));

        // Second run proposes the key the record already has
        assert!(!doc.generate_key(&id, &mut view).unwrap());
    }

    #[test]
    fn test_generate_key_without_names() {
        let mut view = HeadlessView;
        let mut doc = Document::new("nokey.bib", quick_config());
        let id = doc
            .add_item(Entry::new("misc").with_field("title", "Pamphlet"), &mut view)
            .unwrap();
        assert!(!doc.generate_key(&id, &mut view).unwrap());
    }

    #[test]
    fn test_mark_saved_clears_created_and_dirty() {
        let mut view = HeadlessView;
        let mut doc = Document::new("save.bib", quick_config());
        doc.add_empty_item(&mut view).unwrap();
        assert!(doc.is_dirty());
        assert!(doc.created());

        doc.mark_saved(&mut view);
        assert!(!doc.is_dirty());
        assert!(!doc.created());
    }
}
