//! The item registry backing one open document.
//!
//! Items are keyed by [`ItemId`] in insertion order. Every mutation goes
//! through the registry so the per-item source cache stays fresh, and
//! unknown ids surface as [`ModelError::UnknownItem`] instead of panics.
//! Deletion is modeled as hiding: hidden items keep their slot and id and
//! are skipped by the visibility-aware queries.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::{ModelError, ModelResult};
use crate::id_generator::{IdGenerator, ItemId};
use crate::item::Item;
use crate::keys::propose_key;

#[derive(Debug, Clone)]
pub struct Bibliography {
    items: IndexMap<ItemId, Item>,
    ids: IdGenerator,
}

impl Bibliography {
    pub fn new(name: &str) -> Self {
        Self {
            items: IndexMap::new(),
            ids: IdGenerator::new(name),
        }
    }

    /// Add a record at the end of the list and mint its id.
    pub fn append(&mut self, entry: Entry) -> ItemId {
        let id = self.ids.next_id();
        self.items.insert(id.clone(), Item::new(id.clone(), entry));
        id
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Current value of one field, `Ok(None)` when the field is absent.
    pub fn field(&self, id: &ItemId, name: &str) -> ModelResult<Option<&str>> {
        let item = self.items.get(id).ok_or_else(|| ModelError::unknown_item(id))?;
        Ok(item.field(name))
    }

    /// Write or remove one field; `None` removes it.
    pub fn set_field(&mut self, id: &ItemId, name: &str, value: Option<String>) -> ModelResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ModelError::unknown_item(id))?;
        item.set_field(name, value);
        Ok(())
    }

    /// Swap in a whole new record snapshot.
    pub fn replace_entry(&mut self, id: &ItemId, entry: Entry) -> ModelResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ModelError::unknown_item(id))?;
        item.replace_entry(entry);
        Ok(())
    }

    pub fn set_hidden(&mut self, id: &ItemId, hidden: bool) -> ModelResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ModelError::unknown_item(id))?;
        item.set_hidden(hidden);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in insertion order, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Visible items in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &Item> {
        self.items.values().filter(|item| !item.hidden())
    }

    /// The next visible item after `id` in list order, used to relocate the
    /// selection when the selected rows get hidden.
    pub fn next_visible_after(&self, id: &ItemId) -> Option<ItemId> {
        let start = self.items.get_index_of(id)?;
        self.items
            .values()
            .skip(start + 1)
            .find(|item| !item.hidden())
            .map(|item| item.id().clone())
    }

    /// Whether any visible record still has an empty citation key.
    pub fn has_empty_keys(&self) -> bool {
        self.visible().any(|item| item.key().is_empty())
    }

    /// Citation keys used by more than one visible record, sorted.
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in self.visible() {
            if !item.key().is_empty() {
                *counts.entry(item.key()).or_insert(0) += 1;
            }
        }
        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key.to_string())
            .collect();
        duplicates.sort_unstable();
        duplicates
    }

    /// Propose a citation key for `id` that no other visible record uses.
    ///
    /// Returns `Ok(None)` when the record names nobody to derive a key from,
    /// or when `a`..`z` suffixes cannot resolve the collision.
    pub fn suggest_key(&self, id: &ItemId) -> ModelResult<Option<String>> {
        let item = self.items.get(id).ok_or_else(|| ModelError::unknown_item(id))?;
        let base = match propose_key(item.entry()) {
            Some(base) => base,
            None => return Ok(None),
        };
        if !self.key_taken(&base, id) {
            return Ok(Some(base));
        }
        for suffix in b'a'..=b'z' {
            let candidate = format!("{}{}", base, suffix as char);
            if !self.key_taken(&candidate, id) {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn key_taken(&self, key: &str, exclude: &ItemId) -> bool {
        self.items
            .values()
            .any(|item| !item.hidden() && item.id() != exclude && item.key() == key)
    }
}
